//! The six-stage export pipeline.
//!
//! Strictly linear, one stage per step: locate the code page, locate the
//! archive link, download the archive, locate and extract the order file,
//! parse it, render the exports. Two post-steps package each export file and
//! (optionally) delete the intermediate `.go` files. Any failure aborts the
//! run; artifacts already written stay on disk for post-mortem inspection.

use crate::core::{archive, links, parser, render};
use crate::domain::model::{CodeRecord, ExportFile, LinkResult, RenderContext};
use crate::domain::ports::{ConfigProvider, PageFetcher, Storage};
use crate::utils::error::{ExportError, Result};
use chrono::Local;

pub struct ExportPipeline<F: PageFetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
}

impl<F: PageFetcher, S: Storage, C: ConfigProvider> ExportPipeline<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Self {
        Self {
            fetcher,
            storage,
            config,
        }
    }

    /// Runs the whole pipeline and returns the export file names.
    pub async fn run(&self) -> Result<Vec<String>> {
        let link = self.locate_code_page().await?;
        let archive_url = self.locate_archive_link(&link).await?;
        let archive_name = self.download_archive(&archive_url, &link.year).await?;
        let record_path = self
            .locate_and_extract_record_file(&archive_name, &link.year)
            .await?;
        let records = self.parse_records(&record_path).await?;
        let exports = self.render_exports(&records, &link.year).await?;

        self.package_exports(&exports).await?;
        if self.config.cleanup_intermediate() {
            self.cleanup_exports(&exports).await?;
        }

        Ok(exports.into_iter().map(|file| file.name).collect())
    }

    async fn locate_code_page(&self) -> Result<LinkResult> {
        tracing::info!("Loading the code publisher's overview page...");
        let url = format!("{}{}", self.config.base_url(), self.config.code_page_path());
        let page = self.fetcher.fetch_text(&url).await?;

        tracing::info!("Locating most recent ICD-10 CM codes page...");
        let link = links::find_menu_code_link(&page, self.config.base_url())?;
        tracing::info!("Found link for {} ICD-10 codes: {}", link.year, link.url);
        Ok(link)
    }

    async fn locate_archive_link(&self, link: &LinkResult) -> Result<String> {
        tracing::info!("Finding link for tabular order codes...");
        let page = self.fetcher.fetch_text(&link.url).await?;
        links::find_tabular_order_link(&page, self.config.base_url())
    }

    async fn download_archive(&self, url: &str, year: &str) -> Result<String> {
        let archive_name = format!("{year}-code-descriptions-tabular-order.zip");
        tracing::info!("Downloading {}...", archive_name);
        let bytes = self.fetcher.fetch_bytes(url).await?;
        self.storage.write_file(&archive_name, &bytes).await?;

        // Validate what actually landed in storage, not the in-flight bytes.
        let written = self.storage.read_file(&archive_name).await?;
        if !archive::is_zip(&written) {
            return Err(ExportError::DownloadIntegrityError { path: archive_name });
        }
        Ok(archive_name)
    }

    async fn locate_and_extract_record_file(
        &self,
        archive_name: &str,
        year: &str,
    ) -> Result<String> {
        let fragment = format!("{}{year}.txt", self.config.record_file_prefix());
        tracing::info!("Unzipping {}...", fragment);
        let bytes = self.storage.read_file(archive_name).await?;

        let matches = archive::search_entries(&bytes, &fragment, archive_name)?;
        if matches.len() != 1 {
            return Err(ExportError::AmbiguousRecordFileError {
                fragment,
                count: matches.len(),
            });
        }
        archive::extract_entry(&bytes, &matches[0], &self.storage).await
    }

    async fn parse_records(&self, record_path: &str) -> Result<Vec<CodeRecord>> {
        tracing::info!("Parsing codes...");
        let bytes = self.storage.read_file(record_path).await?;
        let records = parser::parse_order_file(&String::from_utf8_lossy(&bytes));
        tracing::info!("Kept {} covered codes", records.len());

        // The extracted file and its directory are scratch space; removal
        // failures are not fatal.
        tracing::info!("Removing order codes file...");
        if let Err(e) = self.storage.delete_file(record_path).await {
            tracing::warn!("Could not remove {}: {}", record_path, e);
        }
        if let Some((dir, _)) = record_path.rsplit_once('/') {
            let _ = self.storage.remove_dir(dir).await;
        }

        Ok(records)
    }

    async fn render_exports(&self, records: &[CodeRecord], year: &str) -> Result<Vec<ExportFile>> {
        tracing::info!("Building global output files...");
        let ctx = RenderContext::new(Local::now(), year);
        let exports = render::render_exports(records, &ctx, self.config.file_name_base());

        for file in &exports {
            tracing::debug!("  Writing {}...", file.name);
            self.storage
                .write_file(&file.name, file.contents.as_bytes())
                .await?;
        }
        Ok(exports)
    }

    async fn package_exports(&self, exports: &[ExportFile]) -> Result<()> {
        tracing::info!("Zipping files...");
        for file in exports {
            let base = file.name.strip_suffix(".go").unwrap_or(&file.name);
            let data = archive::package_file(&file.name, file.contents.as_bytes())?;
            self.storage
                .write_file(&format!("{base}.zip"), &data)
                .await?;
        }
        Ok(())
    }

    async fn cleanup_exports(&self, exports: &[ExportFile]) -> Result<()> {
        // The downloaded archive stays behind for manual verification.
        tracing::info!("Cleaning up intermediary files...");
        for file in exports {
            self.storage.delete_file(&file.name).await?;
        }
        Ok(())
    }
}

//! Zip search, extraction and packaging helpers.

use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use std::io::{Cursor, Read, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::ZipArchive;

/// Post-download integrity check: does this byte blob open as a zip?
pub fn is_zip(bytes: &[u8]) -> bool {
    ZipArchive::new(Cursor::new(bytes)).is_ok()
}

/// Walks every file entry of the archive, at any directory depth, and returns
/// the internal paths whose file name contains `fragment`.
///
/// Zero matches is not an error here; the caller decides whether that is
/// fatal. A non-archive input raises `NotAnArchiveError`.
pub fn search_entries(bytes: &[u8], fragment: &str, source_name: &str) -> Result<Vec<String>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|_| ExportError::NotAnArchiveError {
            path: source_name.to_string(),
        })?;

    let mut matches = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if !entry.is_file() {
            continue;
        }
        let name = entry.name();
        let file_name = name.rsplit('/').next().unwrap_or(name);
        if file_name.contains(fragment) {
            matches.push(name.to_string());
        }
    }

    if matches.is_empty() {
        tracing::warn!("No files found matching \"{}\" in {}", fragment, source_name);
    }
    Ok(matches)
}

/// Extracts one entry to storage under its archive-internal path and returns
/// that path.
pub async fn extract_entry<S: Storage>(
    bytes: &[u8],
    entry_path: &str,
    storage: &S,
) -> Result<String> {
    let contents = {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entry = archive.by_name(entry_path)?;
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buf)?;
        buf
    };
    storage.write_file(entry_path, &contents).await?;
    Ok(entry_path.to_string())
}

/// Packages one file into a single-entry zip (default deflate compression)
/// and returns the archive bytes.
pub fn package_file(name: &str, contents: &[u8]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file::<_, ()>(name, FileOptions::default())?;
    zip.write_all(contents)?;
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

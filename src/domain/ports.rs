use crate::utils::error::Result;
use async_trait::async_trait;

/// Fetches remote pages and files. Injectable so tests can supply canned HTML
/// and archive bytes without touching the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn delete_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn code_page_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn file_name_base(&self) -> &str;
    fn record_file_prefix(&self) -> &str;
    fn cleanup_intermediate(&self) -> bool;
}

pub mod archive;
pub mod fetcher;
pub mod links;
pub mod parser;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{CodeRecord, ExportFile, LinkResult, RenderContext};
pub use crate::domain::ports::{ConfigProvider, PageFetcher, Storage};
pub use crate::utils::error::Result;

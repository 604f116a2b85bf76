pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::core::{fetcher::HttpFetcher, pipeline::ExportPipeline};
pub use crate::utils::error::{ExportError, Result};

pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "icd10-export")]
#[command(about = "Fetch the latest ICD-10-CM codes and build legacy global export files")]
pub struct CliConfig {
    #[arg(long, default_value = "https://www.cms.gov")]
    pub base_url: String,

    #[arg(long, default_value = "/medicare/coding/icd10")]
    pub code_page_path: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Base string for the export file names. The real value is
    /// business-specific; this default matches the published placeholder.
    #[arg(long, default_value = "version - Filename_Base_")]
    pub file_name_base: String,

    #[arg(long, default_value = "icd10cm_order_")]
    pub record_file_prefix: String,

    #[arg(long, help = "Keep the intermediate .go files after zipping")]
    pub keep_intermediate: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn code_page_path(&self) -> &str {
        &self.code_page_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_name_base(&self) -> &str {
        &self.file_name_base
    }

    fn record_file_prefix(&self) -> &str {
        &self.record_file_prefix
    }

    fn cleanup_intermediate(&self) -> bool {
        !self.keep_intermediate
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("code_page_path", &self.code_page_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("file_name_base", &self.file_name_base)?;
        validation::validate_non_empty_string("record_file_prefix", &self.record_file_prefix)?;
        Ok(())
    }
}

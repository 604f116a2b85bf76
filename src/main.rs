use clap::Parser;
use icd10_export::utils::{logger, validation::Validate};
use icd10_export::{CliConfig, ExportPipeline, HttpFetcher, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting icd10-export CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ExportPipeline::new(HttpFetcher::new(), storage, config);

    match pipeline.run().await {
        Ok(exports) => {
            tracing::info!("✅ Export completed successfully!");
            println!("✅ Export completed successfully!");
            for name in exports {
                println!("📁 {}", name);
            }
        }
        Err(e) => {
            tracing::error!("❌ Export failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

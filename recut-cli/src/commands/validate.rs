//! Validate command implementation

use anyhow::Result;
use clap::Args;
use recut_engine::Mode;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match CliConfig::load(&self.config) {
            Ok(config) => {
                let transform = config.transform_config();
                println!("✓ Configuration is valid!");
                println!("  Mode: {}", Mode::from_config(&transform));
                println!("  Context: {}", transform.context);
                println!("  Hashtags: {}", transform.hashtags);
                match (&config.columns.id, &config.columns.text) {
                    (Some(id), Some(text)) => println!("  Columns: id={id}, text={text}"),
                    _ => println!("  Columns: id/text must be given on the command line"),
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }
}

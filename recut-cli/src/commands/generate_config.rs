//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

/// Commented configuration template; every value shown is the default
pub const TEMPLATE: &str = r#"# recut configuration
#
# Command-line flags override the values below.

[columns]
# Required: conversation/post identifier and free-text columns
id = "id"
text = "text"
# Optional: turn-order and speaker columns
# turn = "turn"
# speaker = "speaker"

[transform]
# "chat" (one-to-one dialogue) or "post" (one-to-many); when unset,
# chat if a turn column is given, else post
# kind = "chat"
# "sentence" splits text on . ! ?; "turn" keeps each turn/post whole
granularity = "sentence"
# "combine" (one statement with all hashtags), "separate" (one per hashtag)
# or "drop"; hashtags are always removed from sentence text
hashtags = "combine"
# Speaker written on post sentence rows
post_speaker_label = "salesperson"

[transform.context]
# "rolling" (current statement plus window_size previous ones) or "whole"
policy = "rolling"
window_size = 2

[performance]
# "sequential", "parallel" or "adaptive"
execution_mode = "adaptive"
# Worker threads, 0 = one per core
threads = 0
# Group count at which adaptive mode goes parallel
parallel_threshold = 256
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the column names and options");
        println!("2. Validate your configuration:");
        println!("   recut validate --config {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   recut process -i input.csv --config {}",
            self.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = CliConfig::from_toml(TEMPLATE).unwrap();
        assert_eq!(config.transform.kind, None);
        assert_eq!(
            config.transform_config(),
            recut_engine::TransformConfig {
                kind: recut_engine::GroupKind::Post,
                ..Default::default()
            }
        );
        assert_eq!(config.performance, crate::config::PerformanceConfig::default());
        assert_eq!(config.columns.id.as_deref(), Some("id"));
        assert_eq!(config.columns.turn, None);
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("recut.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
        };
        assert!(args.execute().is_ok());

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[transform.context]"));
    }
}

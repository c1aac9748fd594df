//! CLI command implementations

use clap::Subcommand;
use recut_engine::Mode;

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Turn a table into ID/Turn/Sentence/Speaker/Context/Statement rows
    Process(process::ProcessArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List the four kind×granularity modes
    Modes,

    /// List available output formats
    Formats,
}

/// Print the supported modes
pub fn list_modes() {
    println!("Available modes (--kind × --granularity):");
    for mode in Mode::ALL {
        println!(
            "  {:<8} {:<10} {}",
            mode.kind(),
            mode.granularity(),
            mode.description()
        );
    }
}

/// Print the supported input and output formats
pub fn list_formats() {
    println!("Input formats (--input-format):");
    println!("  csv       Comma-separated values with a header row");
    println!("  jsonl     One JSON object per line");
    println!();
    println!("Output formats (--format):");
    println!("  csv       ID,Turn,Sentence,Speaker,Context,Statement");
    println!("  json      Pretty-printed JSON array");
    println!("  markdown  Markdown table");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_commands_variants() {
        assert!(format!("{:?}", ListCommands::Modes).contains("Modes"));
        assert!(format!("{:?}", ListCommands::Formats).contains("Formats"));
    }

    #[test]
    fn test_validate_command_debug() {
        let cmd = Commands::Validate(validate::ValidateArgs {
            config: "recut.toml".into(),
        });
        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("Validate"));
        assert!(debug_str.contains("recut.toml"));
    }
}

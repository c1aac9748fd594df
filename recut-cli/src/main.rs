//! recut command-line entry point

use anyhow::Result;
use clap::Parser;
use recut_cli::commands::{Commands, ListCommands};

/// Re-cut conversational tables into statement/context rows
#[derive(Debug, Parser)]
#[command(name = "recut", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::List { subcommand } => {
            match subcommand {
                ListCommands::Modes => recut_cli::commands::list_modes(),
                ListCommands::Formats => recut_cli::commands::list_formats(),
            }
            Ok(())
        }
    }
}

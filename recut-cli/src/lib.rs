//! recut CLI library
//!
//! This library provides the command-line interface around the recut
//! engine: table readers, output writers and the subcommands.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};

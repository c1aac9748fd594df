//! Output formatting module

use anyhow::Result;
use recut_engine::OutputRow;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single row
    fn format_row(&mut self, row: &OutputRow) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod csv;
pub mod json;
pub mod markdown;

pub use self::csv::CsvFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use recut_engine::OutputRow;
use std::io::Write;

/// Markdown formatter - outputs rows as a markdown table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    row_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter and write the table header
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "| {} |", OutputRow::COLUMNS.join(" | "))?;
        writeln!(writer, "|{}", "---|".repeat(OutputRow::COLUMNS.len()))?;
        Ok(Self {
            writer,
            row_count: 0,
        })
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_row(&mut self, row: &OutputRow) -> Result<()> {
        self.row_count += 1;
        let cells: Vec<String> = row.to_record().iter().map(|c| escape_cell(c)).collect();
        writeln!(self.writer, "| {} |", cells.join(" | "))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "*Total rows: {}*", self.row_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

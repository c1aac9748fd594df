//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use recut_engine::OutputRow;
use std::io::Write;

/// JSON formatter - outputs rows as a pretty-printed JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    rows: Vec<OutputRow>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_row(&mut self, row: &OutputRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

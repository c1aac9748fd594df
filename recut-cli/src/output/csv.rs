//! CSV output formatter

use super::OutputFormatter;
use anyhow::Result;
use recut_engine::OutputRow;
use std::io::Write;

/// CSV formatter - header row followed by one record per statement
///
/// The header is written up front so an empty result still yields a valid
/// file.
pub struct CsvFormatter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter and write the header
    pub fn new(writer: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(OutputRow::COLUMNS)?;
        Ok(Self { writer })
    }
}

impl<W: Write> OutputFormatter for CsvFormatter<W> {
    fn format_row(&mut self, row: &OutputRow) -> Result<()> {
        self.writer.write_record(row.to_record())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

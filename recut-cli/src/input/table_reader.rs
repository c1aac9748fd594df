//! Table reading utilities

use anyhow::{Context, Result};
use recut_engine::{Cell, SourceTable};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::CliError;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => InputFormat::Jsonl,
            _ => InputFormat::Csv,
        }
    }
}

/// Reads tabular input into a [`SourceTable`]
pub struct TableReader;

impl TableReader {
    /// Read a table from `path`
    pub fn read_path(path: &Path, format: InputFormat) -> Result<SourceTable> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        Self::read(file, format)
            .with_context(|| format!("Failed to read table from: {}", path.display()))
    }

    /// Read a table from any reader
    pub fn read<R: Read>(reader: R, format: InputFormat) -> Result<SourceTable> {
        match format {
            InputFormat::Csv => Self::read_csv(reader),
            InputFormat::Jsonl => Self::read_jsonl(reader),
        }
    }

    /// CSV with a header row; empty fields become missing cells
    pub fn read_csv<R: Read>(reader: R) -> Result<SourceTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record.with_context(|| format!("Malformed CSV record {}", line + 1))?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            Cell::Missing
                        } else {
                            Cell::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }

        Ok(SourceTable::new(columns, rows)?)
    }

    /// JSON Lines; columns are collected in order of first appearance
    pub fn read_jsonl<R: Read>(reader: R) -> Result<SourceTable> {
        let mut columns: Vec<String> = Vec::new();
        let mut objects = Vec::new();

        for (line_no, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line)
                .with_context(|| format!("Invalid JSON on line {}", line_no + 1))?;
            let Value::Object(map) = value else {
                return Err(CliError::InvalidInput(format!(
                    "line {} is not a JSON object",
                    line_no + 1
                ))
                .into());
            };
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
            objects.push(map);
        }

        let rows = objects
            .into_iter()
            .map(|mut map| {
                columns
                    .iter()
                    .map(|col| map.remove(col).map_or(Cell::Missing, json_cell))
                    .collect()
            })
            .collect();

        Ok(SourceTable::new(columns, rows)?)
    }
}

fn json_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::String(s) => Cell::Text(s),
        Value::Bool(b) => Cell::Bool(b),
        Value::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::Number),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_csv() {
        let data = "id,turn,text\nc1,1,\"Hi there. How are you?\"\nc1,2,\nc2,1\n";
        let table = TableReader::read_csv(data.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["id", "turn", "text"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(0, 2).as_text(), "Hi there. How are you?");
        assert_eq!(table.cell(1, 2), &Cell::Missing);
        assert_eq!(table.cell(2, 2), &Cell::Missing);
    }

    #[test]
    fn test_read_csv_strips_bom() {
        let data = "\u{feff}id,text\nx,hello\n";
        let table = TableReader::read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.column_index("id"), Some(0));
    }

    #[test]
    fn test_read_csv_duplicate_header() {
        let err = TableReader::read_csv("a,a\n1,2\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate column"));
    }

    #[test]
    fn test_read_jsonl() {
        let data = r#"{"id": "c1", "turn": 2, "text": "Later."}

{"id": "c1", "turn": 1, "text": null, "speaker": "A"}
"#;
        let table = TableReader::read_jsonl(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let speaker = table.column_index("speaker").unwrap();
        let turn = table.column_index("turn").unwrap();
        let text = table.column_index("text").unwrap();
        assert_eq!(table.cell(0, speaker), &Cell::Missing);
        assert_eq!(table.cell(0, turn), &Cell::Number(2.0));
        assert_eq!(table.cell(1, text), &Cell::Missing);
        assert_eq!(table.cell(1, speaker).as_text(), "A");
    }

    #[test]
    fn test_read_jsonl_rejects_non_objects() {
        let err = TableReader::read_jsonl("[1, 2]\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));

        let err = TableReader::read_jsonl("{oops\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON on line 1"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.jsonl")), InputFormat::Jsonl);
        assert_eq!(InputFormat::from_path(Path::new("a.NDJSON")), InputFormat::Jsonl);
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("noext")), InputFormat::Csv);
    }

    #[test]
    fn test_read_path_missing_file() {
        let err = TableReader::read_path(Path::new("/nonexistent/in.csv"), InputFormat::Csv)
            .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_read_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chats.csv");
        fs::write(&path, "id,text\na,Hello.\n").unwrap();

        let table = TableReader::read_path(&path, InputFormat::Csv).unwrap();
        assert_eq!(table.len(), 1);
    }
}

//! In-memory tabular input
//!
//! The engine never reads files. Callers hand it a [`SourceTable`] of loosely
//! typed [`Cell`]s plus a [`ColumnMapping`] naming the columns to use.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One loosely typed table cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Absent or null value
    #[default]
    Missing,
    /// String value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
}

impl Cell {
    /// Content used as statement text or speaker
    ///
    /// Only `Text` cells carry text. Missing, numeric and boolean cells read
    /// as the empty string so that one odd cell never aborts a batch.
    pub fn as_text(&self) -> &str {
        match self {
            Cell::Text(s) => s.as_str(),
            _ => "",
        }
    }

    /// Render the cell as an identifier or turn label
    ///
    /// Integral numbers drop their fractional part (`3.0` renders as `3`).
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }

    /// Numeric value of the cell, parsing text when possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        }
    }

    /// Check whether the cell is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

static MISSING: Cell = Cell::Missing;

/// Column names plus row-major cells
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl SourceTable {
    /// Create a table, rejecting empty or duplicate column names
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if name.is_empty() {
                return Err(EngineError::InvalidTable {
                    reason: "empty column name".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(EngineError::InvalidTable {
                    reason: format!("duplicate column '{name}'"),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from string literals, mostly for tests and examples
    pub fn from_strings<C, R, S>(columns: C, rows: R) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        R: IntoIterator<Item = Vec<Option<S>>>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map_or(Cell::Missing, |s| Cell::Text(s.into())))
                    .collect()
            })
            .collect();
        Self::new(columns, rows)
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a column name to its index
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row`, `column`; short rows read as [`Cell::Missing`]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&MISSING)
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }
}

/// Caller-chosen column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Conversation or post identifier column
    pub id: String,
    /// Free-text column
    pub text: String,
    /// Optional turn-order column
    #[serde(default)]
    pub turn: Option<String>,
    /// Optional speaker column
    #[serde(default)]
    pub speaker: Option<String>,
}

impl ColumnMapping {
    /// Mapping with only the required columns
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            turn: None,
            speaker: None,
        }
    }

    /// Set the turn-order column
    pub fn with_turn<S: Into<String>>(mut self, turn: S) -> Self {
        self.turn = Some(turn.into());
        self
    }

    /// Set the speaker column
    pub fn with_speaker<S: Into<String>>(mut self, speaker: S) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Resolve the mapping against `table`
    ///
    /// Missing required columns are fatal. Optional columns that the table
    /// does not have are dropped with a warning.
    pub fn resolve(&self, table: &SourceTable) -> Result<ResolvedColumns> {
        let id = table
            .column_index(&self.id)
            .ok_or_else(|| EngineError::MissingColumn {
                role: "id",
                name: self.id.clone(),
            })?;
        let text = table
            .column_index(&self.text)
            .ok_or_else(|| EngineError::MissingColumn {
                role: "text",
                name: self.text.clone(),
            })?;

        Ok(ResolvedColumns {
            id,
            text,
            turn: resolve_optional(table, "turn", self.turn.as_deref()),
            speaker: resolve_optional(table, "speaker", self.speaker.as_deref()),
        })
    }
}

fn resolve_optional(table: &SourceTable, role: &str, name: Option<&str>) -> Option<usize> {
    let name = name?;
    let index = table.column_index(name);
    if index.is_none() {
        log::warn!("{role} column '{name}' not found in input, ignoring it");
    }
    index
}

/// Column indices after resolution against a concrete table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Identifier column index
    pub id: usize,
    /// Text column index
    pub text: usize,
    /// Turn-order column index, if usable
    pub turn: Option<usize>,
    /// Speaker column index, if usable
    pub speaker: Option<usize>,
}

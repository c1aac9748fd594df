//! Row assembly
//!
//! Turns a group's statement stream into output rows, attaching the context
//! window of every statement.

use crate::config::TransformConfig;
use crate::context::ContextWindowBuilder;
use crate::grouping::{Group, TurnKey};
use crate::mode::{AtomicStatement, Mode};
use recut_text::is_degenerate;
use serde::{Deserialize, Serialize};

/// One row of the standardized output schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Group identifier
    #[serde(rename = "ID")]
    pub id: String,
    /// Turn number
    #[serde(rename = "Turn")]
    pub turn: TurnKey,
    /// 1-based statement index within the group
    #[serde(rename = "Sentence")]
    pub sentence: usize,
    /// Speaker, empty when not applicable
    #[serde(rename = "Speaker")]
    pub speaker: String,
    /// Context window text, including the statement itself
    #[serde(rename = "Context")]
    pub context: String,
    /// Statement text
    #[serde(rename = "Statement")]
    pub statement: String,
}

impl OutputRow {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 6] =
        ["ID", "Turn", "Sentence", "Speaker", "Context", "Statement"];

    /// Field values as strings, in [`OutputRow::COLUMNS`] order
    pub fn to_record(&self) -> [String; 6] {
        [
            self.id.clone(),
            self.turn.to_string(),
            self.sentence.to_string(),
            self.speaker.clone(),
            self.context.clone(),
            self.statement.clone(),
        ]
    }
}

/// Builds output rows for one group at a time
#[derive(Debug, Clone)]
pub struct RowAssembler {
    mode: Mode,
    config: TransformConfig,
    windows: ContextWindowBuilder,
}

impl RowAssembler {
    /// Create an assembler for `config`
    pub fn new(config: TransformConfig) -> Self {
        Self {
            mode: Mode::from_config(&config),
            windows: ContextWindowBuilder::new(config.context),
            config,
        }
    }

    /// Mode in use
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Segment `group` and assemble its rows
    ///
    /// A group whose text is entirely degenerate yields no rows.
    pub fn assemble(&self, group: &Group) -> Vec<OutputRow> {
        let stream = self.mode.segment(group, &self.config);
        let rows = self.assemble_stream(&stream);
        log::debug!(
            "group '{}': {} turn(s), {} statement(s)",
            group.id,
            group.turns.len(),
            rows.len()
        );
        rows
    }

    /// Assemble rows for an already segmented stream
    ///
    /// Windows are built over the whole stream; degenerate statements are
    /// then dropped and `Sentence` renumbered 1..k over the survivors.
    pub fn assemble_stream(&self, stream: &[AtomicStatement]) -> Vec<OutputRow> {
        self.windows
            .windows(stream)
            .zip(stream)
            .filter(|(_, statement)| !is_degenerate(&statement.text))
            .enumerate()
            .map(|(index, (window, statement))| OutputRow {
                id: statement.group_id.clone(),
                turn: statement.turn.clone(),
                sentence: index + 1,
                speaker: statement.speaker.clone(),
                context: window.text(),
                statement: statement.text.clone(),
            })
            .collect()
    }
}

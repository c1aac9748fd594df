//! Grouping and turn ordering
//!
//! Rows are grouped by identifier in order of first appearance. Inside a
//! group the turn column, when present, decides the order through a stable
//! sort; otherwise rows keep their input order and are numbered from 1.
//! Once built, a [`Group`]'s order is fixed.

use crate::table::{ResolvedColumns, SourceTable};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Turn number of a statement
///
/// Always serializes as a string so the `Turn` column keeps one type
/// whether the value was synthesized or read from the turn column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum TurnKey {
    /// Synthetic 1-based position
    Position(usize),
    /// Label taken from the turn column
    Value(String),
}

impl Serialize for TurnKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for TurnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnKey::Position(n) => write!(f, "{n}"),
            TurnKey::Value(label) => f.write_str(label),
        }
    }
}

/// One row's contribution to a group
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Turn number
    pub key: TurnKey,
    /// Speaker, empty when not applicable
    pub speaker: String,
    /// Raw text, empty when the cell was missing
    pub text: String,
}

/// All rows sharing one identifier, in their final order
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group identifier label
    pub id: String,
    /// Ordered turns
    pub turns: Vec<Turn>,
}

impl Group {
    /// Space-joined text of every turn, used for posts
    pub fn concatenated_text(&self) -> String {
        self.turns
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Groups built from a table plus bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Groups in order of first appearance
    pub groups: Vec<Group>,
    /// Rows dropped because their identifier was missing
    pub skipped_rows: usize,
}

/// Sort key for one row inside its group
enum SortKey {
    Number(f64),
    Label(String),
    Missing,
}

struct PendingRow {
    row: usize,
    turn_label: Option<String>,
    turn_number: Option<f64>,
}

/// Group the rows of `table` by the identifier column
pub fn group_rows(table: &SourceTable, columns: &ResolvedColumns) -> Grouping {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut pending: Vec<(String, Vec<PendingRow>)> = Vec::new();
    let mut skipped_rows = 0;

    for row in 0..table.len() {
        let Some(id) = table.cell(row, columns.id).label() else {
            skipped_rows += 1;
            continue;
        };

        let (turn_label, turn_number) = match columns.turn {
            Some(col) => {
                let cell = table.cell(row, col);
                (cell.label(), cell.as_number())
            }
            None => (None, None),
        };

        let slot = *index.entry(id.clone()).or_insert_with(|| {
            pending.push((id, Vec::new()));
            pending.len() - 1
        });
        pending[slot].1.push(PendingRow {
            row,
            turn_label,
            turn_number,
        });
    }

    if skipped_rows > 0 {
        log::warn!("skipped {skipped_rows} row(s) with a missing identifier");
    }

    let groups = pending
        .into_iter()
        .map(|(id, rows)| build_group(table, columns, id, rows))
        .collect();

    Grouping {
        groups,
        skipped_rows,
    }
}

fn build_group(
    table: &SourceTable,
    columns: &ResolvedColumns,
    id: String,
    mut rows: Vec<PendingRow>,
) -> Group {
    let speaker_of = |row: usize| {
        columns
            .speaker
            .map(|col| table.cell(row, col).as_text().to_string())
            .unwrap_or_default()
    };
    let text_of = |row: usize| table.cell(row, columns.text).as_text().to_string();

    if columns.turn.is_none() {
        let turns = rows
            .iter()
            .enumerate()
            .map(|(i, r)| Turn {
                key: TurnKey::Position(i + 1),
                speaker: speaker_of(r.row),
                text: text_of(r.row),
            })
            .collect();
        return Group { id, turns };
    }

    // Numeric order only when every present turn label is a number
    let numeric = rows
        .iter()
        .all(|r| r.turn_label.is_none() || r.turn_number.is_some());
    let sort_key = |r: &PendingRow| match (&r.turn_label, r.turn_number) {
        (None, _) => SortKey::Missing,
        (Some(_), Some(n)) if numeric => SortKey::Number(n),
        (Some(label), _) => SortKey::Label(label.clone()),
    };
    rows.sort_by(|a, b| compare_keys(&sort_key(a), &sort_key(b)));

    let turns = rows
        .into_iter()
        .map(|r| Turn {
            speaker: speaker_of(r.row),
            text: text_of(r.row),
            key: TurnKey::Value(r.turn_label.unwrap_or_default()),
        })
        .collect();
    Group { id, turns }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Label(x), SortKey::Label(y)) => x.cmp(y),
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        // Mixed keys cannot occur within one group
        (SortKey::Number(_), SortKey::Label(_)) => Ordering::Less,
        (SortKey::Label(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, ColumnMapping};

    fn resolve(table: &SourceTable, mapping: ColumnMapping) -> ResolvedColumns {
        mapping.resolve(table).unwrap()
    }

    #[test]
    fn test_first_appearance_order() {
        let table = SourceTable::from_strings(
            ["id", "text"],
            vec![
                vec![Some("b"), Some("one")],
                vec![Some("a"), Some("two")],
                vec![Some("b"), Some("three")],
            ],
        )
        .unwrap();
        let grouping = group_rows(&table, &resolve(&table, ColumnMapping::new("id", "text")));

        let ids: Vec<_> = grouping.groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(grouping.groups[0].turns.len(), 2);
        assert_eq!(grouping.groups[0].turns[1].key, TurnKey::Position(2));
        assert_eq!(grouping.groups[0].turns[1].text, "three");
    }

    #[test]
    fn test_numeric_turn_sort_is_stable() {
        let table = SourceTable::from_strings(
            ["id", "turn", "text"],
            vec![
                vec![Some("c"), Some("10"), Some("ten")],
                vec![Some("c"), Some("2"), Some("two-a")],
                vec![Some("c"), Some("2"), Some("two-b")],
                vec![Some("c"), Some("1"), Some("one")],
            ],
        )
        .unwrap();
        let columns = resolve(&table, ColumnMapping::new("id", "text").with_turn("turn"));
        let group = &group_rows(&table, &columns).groups[0];

        let texts: Vec<_> = group.turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two-a", "two-b", "ten"]);
        assert_eq!(group.turns[3].key, TurnKey::Value("10".to_string()));
    }

    #[test]
    fn test_lexical_turn_sort_when_not_numeric() {
        let table = SourceTable::from_strings(
            ["id", "turn", "text"],
            vec![
                vec![Some("c"), Some("b"), Some("second")],
                vec![Some("c"), Some("10"), Some("first")],
                vec![Some("c"), None, Some("last")],
                vec![Some("c"), Some("c"), Some("third")],
            ],
        )
        .unwrap();
        let columns = resolve(&table, ColumnMapping::new("id", "text").with_turn("turn"));
        let group = &group_rows(&table, &columns).groups[0];

        let texts: Vec<_> = group.turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third", "last"]);
        assert_eq!(group.turns[3].key, TurnKey::Value(String::new()));
    }

    #[test]
    fn test_missing_cells_normalize_to_empty() {
        let table = SourceTable::new(
            vec!["id".into(), "text".into(), "speaker".into()],
            vec![
                vec![Cell::from("c"), Cell::Missing, Cell::Number(7.0)],
                vec![Cell::Missing, Cell::from("orphan")],
                vec![Cell::Number(1.0), Cell::from("numeric id")],
            ],
        )
        .unwrap();
        let columns = resolve(&table, ColumnMapping::new("id", "text").with_speaker("speaker"));
        let grouping = group_rows(&table, &columns);

        assert_eq!(grouping.skipped_rows, 1);
        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.groups[0].turns[0].text, "");
        assert_eq!(grouping.groups[0].turns[0].speaker, "");
        assert_eq!(grouping.groups[1].id, "1");
    }

    #[test]
    fn test_concatenated_text() {
        let group = Group {
            id: "p".to_string(),
            turns: vec![
                Turn {
                    key: TurnKey::Position(1),
                    speaker: String::new(),
                    text: "Check this out!!!".to_string(),
                },
                Turn {
                    key: TurnKey::Position(2),
                    speaker: String::new(),
                    text: "#deal #sale".to_string(),
                },
            ],
        };
        assert_eq!(group.concatenated_text(), "Check this out!!! #deal #sale");
    }

    #[test]
    fn test_turn_key_serializes_as_string() {
        assert_eq!(serde_json::to_string(&TurnKey::Position(3)).unwrap(), "\"3\"");
        assert_eq!(
            serde_json::to_string(&TurnKey::Value("2".into())).unwrap(),
            "\"2\""
        );
        assert_eq!(
            serde_json::to_string(&TurnKey::Value("3a".into())).unwrap(),
            "\"3a\""
        );
    }

    #[test]
    fn test_turn_key_deserializes_numbers_and_labels() {
        let key: TurnKey = serde_json::from_str("4").unwrap();
        assert_eq!(key, TurnKey::Position(4));
        let key: TurnKey = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(key, TurnKey::Value("4".into()));
    }
}

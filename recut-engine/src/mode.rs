//! Mode dispatch and statement segmentation
//!
//! A [`Mode`] is the pair group kind × granularity. Each mode turns one
//! [`Group`] into its flat, ordered stream of [`AtomicStatement`]s; the
//! context windows are computed afterwards over that stream, the same way
//! for every mode.

use crate::config::{Granularity, GroupKind, HashtagPolicy, TransformConfig};
use crate::grouping::{Group, Turn, TurnKey};
use recut_text::{extract_hashtags, retain_meaningful, split_sentences, strip_hashtags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One emitted unit of text
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicStatement {
    /// Identifier of the owning group
    pub group_id: String,
    /// Turn (or post index) the statement came from
    pub turn: TurnKey,
    /// 1-based position in the group's statement stream
    pub sequence_index: usize,
    /// Speaker, empty when not applicable
    pub speaker: String,
    /// Statement text; only chat×turn streams may carry degenerate turns
    pub text: String,
}

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Chat split into sentences
    ChatSentence,
    /// Chat with one statement per turn
    ChatTurn,
    /// Post split into sentences
    PostSentence,
    /// Post as one statement plus its hashtags
    PostStatement,
}

impl Mode {
    /// All modes, in display order
    pub const ALL: [Mode; 4] = [
        Mode::ChatSentence,
        Mode::ChatTurn,
        Mode::PostSentence,
        Mode::PostStatement,
    ];

    /// Combine the two configuration axes
    pub fn new(kind: GroupKind, granularity: Granularity) -> Self {
        match (kind, granularity) {
            (GroupKind::Chat, Granularity::Sentence) => Mode::ChatSentence,
            (GroupKind::Chat, Granularity::Turn) => Mode::ChatTurn,
            (GroupKind::Post, Granularity::Sentence) => Mode::PostSentence,
            (GroupKind::Post, Granularity::Turn) => Mode::PostStatement,
        }
    }

    /// Mode selected by `config`
    pub fn from_config(config: &TransformConfig) -> Self {
        Self::new(config.kind, config.granularity)
    }

    /// Group kind axis
    pub fn kind(&self) -> GroupKind {
        match self {
            Mode::ChatSentence | Mode::ChatTurn => GroupKind::Chat,
            Mode::PostSentence | Mode::PostStatement => GroupKind::Post,
        }
    }

    /// Granularity axis
    pub fn granularity(&self) -> Granularity {
        match self {
            Mode::ChatSentence | Mode::PostSentence => Granularity::Sentence,
            Mode::ChatTurn | Mode::PostStatement => Granularity::Turn,
        }
    }

    /// Short description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Mode::ChatSentence => "dialogue turns split into sentences",
            Mode::ChatTurn => "one statement per dialogue turn",
            Mode::PostSentence => "post text split into sentences",
            Mode::PostStatement => "whole post as one statement",
        }
    }

    /// Segment `group` into its statement stream
    pub fn segment(&self, group: &Group, config: &TransformConfig) -> Vec<AtomicStatement> {
        let mut stream = StatementStream::new(&group.id);
        match self {
            Mode::ChatSentence => {
                for turn in &group.turns {
                    for text in sentence_candidates(&turn.text, config.hashtags) {
                        stream.push(turn.key.clone(), &turn.speaker, text);
                    }
                }
            }
            Mode::ChatTurn => {
                // Degenerate turns stay in the stream so windows span the
                // full turn sequence; assembly drops their rows.
                for Turn { key, speaker, text } in &group.turns {
                    stream.push(key.clone(), speaker, text.trim().to_string());
                }
            }
            Mode::PostSentence => {
                let raw = group.concatenated_text();
                for text in sentence_candidates(&raw, config.hashtags) {
                    stream.push_indexed(&config.post_speaker_label, text);
                }
            }
            Mode::PostStatement => {
                let raw = group.concatenated_text();
                for text in post_candidates(&raw, config.hashtags) {
                    stream.push_indexed("", text);
                }
            }
        }
        stream.finish()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.kind(), self.granularity())
    }
}

/// Accumulates statements and numbers them contiguously
struct StatementStream<'a> {
    group_id: &'a str,
    statements: Vec<AtomicStatement>,
}

impl<'a> StatementStream<'a> {
    fn new(group_id: &'a str) -> Self {
        Self {
            group_id,
            statements: Vec::new(),
        }
    }

    fn push(&mut self, turn: TurnKey, speaker: &str, text: String) {
        let sequence_index = self.statements.len() + 1;
        self.statements.push(AtomicStatement {
            group_id: self.group_id.to_string(),
            turn,
            sequence_index,
            speaker: speaker.to_string(),
            text,
        });
    }

    /// Push a statement whose turn equals its sequence index
    fn push_indexed(&mut self, speaker: &str, text: String) {
        let turn = TurnKey::Position(self.statements.len() + 1);
        self.push(turn, speaker, text);
    }

    fn finish(self) -> Vec<AtomicStatement> {
        self.statements
    }
}

/// Hashtag statements for `tags` under `policy`
fn hashtag_statements(tags: &[&str], policy: HashtagPolicy) -> Vec<String> {
    if tags.is_empty() {
        return Vec::new();
    }
    match policy {
        HashtagPolicy::Drop => Vec::new(),
        HashtagPolicy::Combine => vec![tags.join(" ")],
        HashtagPolicy::Separate => tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Sentences of `raw` followed by its hashtag statements, degenerate ones removed
fn sentence_candidates(raw: &str, policy: HashtagPolicy) -> Vec<String> {
    let tags = extract_hashtags(raw);
    let mut candidates = split_sentences(&strip_hashtags(raw));
    candidates.extend(hashtag_statements(&tags, policy));
    retain_meaningful(&mut candidates);
    candidates
}

/// Whole hashtag-free post followed by its hashtag statements
fn post_candidates(raw: &str, policy: HashtagPolicy) -> Vec<String> {
    let tags = extract_hashtags(raw);
    let body = strip_hashtags(raw).trim().to_string();
    let mut candidates = vec![body];
    candidates.extend(hashtag_statements(&tags, policy));
    retain_meaningful(&mut candidates);
    candidates
}

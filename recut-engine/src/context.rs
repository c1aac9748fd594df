//! Context window construction
//!
//! Every statement gets a window over its group's statement stream that ends
//! at, and includes, the statement itself. Under [`ContextPolicy::Rolling`]
//! the window reaches back `window_size` statements; under
//! [`ContextPolicy::Whole`] it reaches back to the first statement of the
//! group. The stream is never reordered here.

use crate::error::{EngineError, Result};
use crate::mode::AtomicStatement;
use recut_text::is_degenerate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Default number of preceding statements in a rolling window
pub const DEFAULT_WINDOW_SIZE: usize = 2;

/// How far back a context window reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum ContextPolicy {
    /// The current statement plus up to `window_size` preceding ones
    Rolling {
        /// Number of statements before the current one
        window_size: usize,
    },
    /// Every statement from the start of the group through the current one
    Whole,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        ContextPolicy::Rolling {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl ContextPolicy {
    /// Rolling policy with the given window size
    pub fn rolling(window_size: usize) -> Self {
        ContextPolicy::Rolling { window_size }
    }

    /// Zero-based index range of the window for the 1-based `position`
    pub fn window(&self, position: usize) -> Range<usize> {
        debug_assert!(position >= 1, "positions are 1-based");
        let end = position;
        let start = match *self {
            ContextPolicy::Rolling { window_size } => {
                position.saturating_sub(1).saturating_sub(window_size)
            }
            ContextPolicy::Whole => 0,
        };
        start..end
    }

    /// Number of statements in the window for the 1-based `position`
    pub fn width(&self, position: usize) -> usize {
        self.window(position).len()
    }
}

impl fmt::Display for ContextPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextPolicy::Rolling { window_size } => write!(f, "rolling:{window_size}"),
            ContextPolicy::Whole => write!(f, "whole"),
        }
    }
}

impl FromStr for ContextPolicy {
    type Err = EngineError;

    /// Parse `whole`, `rolling` or `rolling:N`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (kind, size) = match s.split_once(':') {
            Some((kind, size)) => (kind, Some(size.trim())),
            None => (s, None),
        };

        match (kind.to_ascii_lowercase().as_str(), size) {
            ("whole", None) => Ok(ContextPolicy::Whole),
            ("rolling", None) => Ok(ContextPolicy::default()),
            ("rolling", Some(size)) => size
                .parse::<usize>()
                .map(ContextPolicy::rolling)
                .map_err(|_| {
                    EngineError::config(format!(
                        "window size must be a non-negative integer, got '{size}'"
                    ))
                }),
            _ => Err(EngineError::config(format!(
                "unknown context policy '{s}' (expected rolling, rolling:N or whole)"
            ))),
        }
    }
}

/// Borrowed view over the statements that make up one context
#[derive(Debug, Clone, Copy)]
pub struct ContextWindow<'a> {
    members: &'a [AtomicStatement],
}

impl<'a> ContextWindow<'a> {
    /// Statements in the window, oldest first
    pub fn members(&self) -> &'a [AtomicStatement] {
        self.members
    }

    /// Number of statements in the window
    pub fn width(&self) -> usize {
        self.members.len()
    }

    /// Space-joined text of the non-degenerate members
    pub fn text(&self) -> String {
        let mut joined = String::new();
        for statement in self.members {
            if is_degenerate(&statement.text) {
                continue;
            }
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(&statement.text);
        }
        joined.trim().to_string()
    }
}

/// Computes context windows over one group's statement stream
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextWindowBuilder {
    policy: ContextPolicy,
}

impl ContextWindowBuilder {
    /// Create a builder for `policy`
    pub fn new(policy: ContextPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use
    pub fn policy(&self) -> ContextPolicy {
        self.policy
    }

    /// Window for the statement at 1-based `position` in `stream`
    ///
    /// Returns `None` if `position` is outside the stream.
    pub fn window<'a>(
        &self,
        stream: &'a [AtomicStatement],
        position: usize,
    ) -> Option<ContextWindow<'a>> {
        if position == 0 || position > stream.len() {
            return None;
        }
        Some(ContextWindow {
            members: &stream[self.policy.window(position)],
        })
    }

    /// Iterate over the window of every statement, in stream order
    pub fn windows<'a>(
        &self,
        stream: &'a [AtomicStatement],
    ) -> impl Iterator<Item = ContextWindow<'a>> + 'a {
        let policy = self.policy;
        (1..=stream.len()).map(move |position| ContextWindow {
            members: &stream[policy.window(position)],
        })
    }

    /// Context text for every statement, in stream order
    pub fn build(&self, stream: &[AtomicStatement]) -> Vec<String> {
        self.windows(stream).map(|w| w.text()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::TurnKey;

    fn stream(texts: &[&str]) -> Vec<AtomicStatement> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| AtomicStatement {
                group_id: "g".to_string(),
                turn: TurnKey::Position(1),
                sequence_index: i + 1,
                speaker: String::new(),
                text: t.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_rolling_window_ranges() {
        let policy = ContextPolicy::rolling(1);
        assert_eq!(policy.window(1), 0..1);
        assert_eq!(policy.window(2), 0..2);
        assert_eq!(policy.window(3), 1..3);
        assert_eq!(policy.window(10), 8..10);
    }

    #[test]
    fn test_zero_window_still_includes_current() {
        let policy = ContextPolicy::rolling(0);
        for position in 1..6 {
            assert_eq!(policy.width(position), 1);
            assert_eq!(policy.window(position), position - 1..position);
        }
    }

    #[test]
    fn test_whole_window_ranges() {
        let policy = ContextPolicy::Whole;
        assert_eq!(policy.window(1), 0..1);
        assert_eq!(policy.window(4), 0..4);
    }

    #[test]
    fn test_build_rolling() {
        let statements = stream(&["Hi there.", "How are you?", "I'm good!", "#happy"]);
        let contexts = ContextWindowBuilder::new(ContextPolicy::rolling(1)).build(&statements);
        assert_eq!(
            contexts,
            vec![
                "Hi there.",
                "Hi there. How are you?",
                "How are you? I'm good!",
                "I'm good! #happy",
            ]
        );
    }

    #[test]
    fn test_build_whole() {
        let statements = stream(&["A.", "B.", "C.", "D."]);
        let contexts = ContextWindowBuilder::new(ContextPolicy::Whole).build(&statements);
        assert_eq!(contexts[2], "A. B. C.");
        assert_eq!(contexts[3], "A. B. C. D.");
    }

    #[test]
    fn test_degenerate_members_are_skipped_in_text() {
        let statements = stream(&["One.", "...", "Two."]);
        let builder = ContextWindowBuilder::new(ContextPolicy::Whole);
        let window = builder.window(&statements, 3).unwrap();
        assert_eq!(window.width(), 3);
        assert_eq!(window.text(), "One. Two.");
    }

    #[test]
    fn test_window_out_of_range() {
        let statements = stream(&["A."]);
        let builder = ContextWindowBuilder::default();
        assert!(builder.window(&statements, 0).is_none());
        assert!(builder.window(&statements, 2).is_none());
        assert!(builder.build(&[]).is_empty());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("whole".parse::<ContextPolicy>().unwrap(), ContextPolicy::Whole);
        assert_eq!(
            "rolling".parse::<ContextPolicy>().unwrap(),
            ContextPolicy::rolling(DEFAULT_WINDOW_SIZE)
        );
        assert_eq!(
            "Rolling:5".parse::<ContextPolicy>().unwrap(),
            ContextPolicy::rolling(5)
        );
        assert!("rolling:-1".parse::<ContextPolicy>().is_err());
        assert!("sliding".parse::<ContextPolicy>().is_err());
        assert!("whole:3".parse::<ContextPolicy>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for policy in [ContextPolicy::Whole, ContextPolicy::rolling(3)] {
            assert_eq!(policy.to_string().parse::<ContextPolicy>().unwrap(), policy);
        }
    }
}

//! Punctuation-driven sentence splitting
//!
//! The splitter is a heuristic: it breaks after a terminator that is
//! followed by whitespace and knows nothing about abbreviations or
//! ellipses. `"Dr. Who"` becomes two fragments, `"Wait... what"` too.

use smallvec::SmallVec;

const DEFAULT_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Sentence splitter over a configurable terminator set
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    terminators: SmallVec<[char; 4]>,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self {
            terminators: SmallVec::from_slice(&DEFAULT_TERMINATORS),
        }
    }
}

impl SentenceSplitter {
    /// Create a splitter breaking on `.`, `!` and `?`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter breaking on the given terminator characters
    pub fn with_terminators<I: IntoIterator<Item = char>>(terminators: I) -> Self {
        Self {
            terminators: terminators.into_iter().collect(),
        }
    }

    /// Check whether `ch` ends a sentence
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    /// Split `text` into trimmed, non-empty fragments
    ///
    /// Newlines are folded into spaces first. A boundary falls right after
    /// a terminator whose next character is whitespace, so a run such as
    /// `"!!!"` stays attached to its sentence and yields one boundary.
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        let normalized = normalized.trim();

        let mut fragments = Vec::new();
        let mut start = 0;
        let mut chars = normalized.char_indices().peekable();

        while let Some((_, ch)) = chars.next() {
            if !self.is_terminator(ch) {
                continue;
            }
            let Some(&(end, next)) = chars.peek() else {
                break;
            };
            if !next.is_whitespace() {
                continue;
            }

            push_fragment(&mut fragments, &normalized[start..end]);
            while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
                chars.next();
            }
            start = chars.peek().map_or(normalized.len(), |&(pos, _)| pos);
        }

        push_fragment(&mut fragments, &normalized[start..]);
        fragments
    }
}

fn push_fragment(fragments: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}

/// Split `text` with the default `.`, `!`, `?` terminators
pub fn split_sentences(text: &str) -> Vec<String> {
    SentenceSplitter::default().split(text)
}

//! Text-level primitives for statement segmentation
//!
//! This crate holds the pure, allocation-light building blocks that the
//! recut engine composes into per-group statement streams:
//!
//! - [`hashtag`]: find `#word` tokens and remove them from text
//! - [`splitter`]: break text into sentence-like fragments on `.`, `!`, `?`
//! - [`fragment`]: recognise punctuation-only (degenerate) fragments
//!
//! None of these functions fail. Empty input yields empty output.
//!
//! # Example
//!
//! ```rust
//! use recut_text::{extract_hashtags, is_degenerate, split_sentences, strip_hashtags};
//!
//! let raw = "I'm good! Thanks. #happy #monday";
//! assert_eq!(extract_hashtags(raw).as_slice(), &["#happy", "#monday"]);
//!
//! let sentences = split_sentences(&strip_hashtags(raw));
//! assert_eq!(sentences, vec!["I'm good!", "Thanks."]);
//! assert!(is_degenerate("?!"));
//! ```

#![warn(missing_docs)]

pub mod fragment;
pub mod hashtag;
pub mod splitter;

pub use fragment::{is_degenerate, retain_meaningful};
pub use hashtag::{extract_hashtags, strip_hashtags, Hashtags};
pub use splitter::{split_sentences, SentenceSplitter};

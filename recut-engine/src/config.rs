//! Configuration types for the engine

use crate::context::ContextPolicy;
use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;
use crate::table::ColumnMapping;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Speaker label used for post×sentence rows unless configured otherwise
pub const DEFAULT_POST_SPEAKER_LABEL: &str = "salesperson";

/// Shape of the conversation data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// One-to-one dialogue with ordered turns and speakers
    #[default]
    Chat,
    /// One-to-many post with a single author and no turns
    Post,
}

impl GroupKind {
    /// Guess the kind from the columns the caller named
    ///
    /// A turn column means dialogue data; without one rows are treated as posts.
    pub fn infer(mapping: &ColumnMapping) -> Self {
        if mapping.turn.is_some() {
            GroupKind::Chat
        } else {
            GroupKind::Post
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Chat => "chat",
            GroupKind::Post => "post",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(GroupKind::Chat),
            "post" => Ok(GroupKind::Post),
            other => Err(EngineError::config(format!(
                "unknown group kind '{other}' (expected chat or post)"
            ))),
        }
    }
}

/// Size of one emitted statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One statement per sentence
    #[default]
    Sentence,
    /// One statement per turn (chat) or per post
    Turn,
}

impl Granularity {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Sentence => "sentence",
            Granularity::Turn => "turn",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentence" => Ok(Granularity::Sentence),
            "turn" | "post" | "statement" => Ok(Granularity::Turn),
            other => Err(EngineError::config(format!(
                "unknown granularity '{other}' (expected sentence or turn)"
            ))),
        }
    }
}

/// What happens to hashtags found in a turn or post
///
/// Hashtags are always removed from the text before sentence splitting; the
/// policy only decides whether they come back as statements of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashtagPolicy {
    /// Discard hashtags
    Drop,
    /// Emit all hashtags of a turn as one space-joined statement
    #[default]
    Combine,
    /// Emit one statement per hashtag
    Separate,
}

impl HashtagPolicy {
    /// Build the policy from the keep/combine switches
    ///
    /// `combine` is ignored when `keep` is false.
    pub fn from_flags(keep: bool, combine: bool) -> Self {
        match (keep, combine) {
            (false, _) => HashtagPolicy::Drop,
            (true, true) => HashtagPolicy::Combine,
            (true, false) => HashtagPolicy::Separate,
        }
    }

    /// Whether hashtags are emitted at all
    pub fn keeps(&self) -> bool {
        !matches!(self, HashtagPolicy::Drop)
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            HashtagPolicy::Drop => "drop",
            HashtagPolicy::Combine => "combine",
            HashtagPolicy::Separate => "separate",
        }
    }
}

impl fmt::Display for HashtagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashtagPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(HashtagPolicy::Drop),
            "combine" => Ok(HashtagPolicy::Combine),
            "separate" => Ok(HashtagPolicy::Separate),
            other => Err(EngineError::config(format!(
                "unknown hashtag policy '{other}' (expected drop, combine or separate)"
            ))),
        }
    }
}

/// Options that shape the output rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Chat or post data
    pub kind: GroupKind,
    /// Sentence-level or turn/post-level statements
    pub granularity: Granularity,
    /// Context window policy
    pub context: ContextPolicy,
    /// Hashtag handling
    pub hashtags: HashtagPolicy,
    /// Speaker written on post×sentence rows
    pub post_speaker_label: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            kind: GroupKind::default(),
            granularity: Granularity::default(),
            context: ContextPolicy::default(),
            hashtags: HashtagPolicy::default(),
            post_speaker_label: DEFAULT_POST_SPEAKER_LABEL.to_string(),
        }
    }
}

impl TransformConfig {
    /// Start a builder from the defaults
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::new()
    }

    /// Check option combinations
    pub fn validate(&self) -> Result<()> {
        if self.kind == GroupKind::Post
            && self.granularity == Granularity::Sentence
            && self.post_speaker_label.trim().is_empty()
        {
            return Err(EngineError::config(
                "post speaker label must not be empty for post×sentence output",
            ));
        }
        Ok(())
    }
}

/// Builder for [`TransformConfig`]
#[derive(Debug, Default)]
pub struct TransformConfigBuilder {
    config: TransformConfig,
}

impl TransformConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group kind
    pub fn kind(mut self, kind: GroupKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Set the statement granularity
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.config.granularity = granularity;
        self
    }

    /// Set the context policy
    pub fn context(mut self, policy: ContextPolicy) -> Self {
        self.config.context = policy;
        self
    }

    /// Use a rolling window over `window_size` preceding statements
    pub fn rolling(self, window_size: usize) -> Self {
        self.context(ContextPolicy::rolling(window_size))
    }

    /// Use the whole-history window
    pub fn whole(self) -> Self {
        self.context(ContextPolicy::Whole)
    }

    /// Set the hashtag policy
    pub fn hashtags(mut self, policy: HashtagPolicy) -> Self {
        self.config.hashtags = policy;
        self
    }

    /// Set the post speaker label
    pub fn post_speaker_label<S: Into<String>>(mut self, label: S) -> Self {
        self.config.post_speaker_label = label.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TransformConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Execution tuning; never changes the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of worker threads (None = rayon default)
    pub threads: Option<usize>,
    /// Minimum group count before adaptive mode goes parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 256,
        }
    }
}

impl EngineConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            parallel_threshold: usize::MAX,
        }
    }

    /// Always-parallel configuration
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            threads,
            parallel_threshold: 0,
        }
    }

    /// Check execution settings
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(EngineError::config("thread count must be at least 1"));
        }
        Ok(())
    }
}

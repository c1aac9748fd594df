//! Configuration file support
//!
//! A config file is TOML with three optional sections:
//!
//! ```toml
//! [columns]
//! id = "chat_id"
//! text = "message"
//!
//! [transform]
//! kind = "chat"
//!
//! [performance]
//! threads = 4
//! ```
//!
//! Command-line flags override anything set here.

use anyhow::{Context, Result};
use recut_engine::{
    ContextPolicy, EngineConfig, ExecutionMode, Granularity, GroupKind, HashtagPolicy,
    TransformConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Column selection
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Transform options
    #[serde(default)]
    pub transform: TransformSection,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Column names; all optional so flags can supply them
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    /// Identifier column
    pub id: Option<String>,
    /// Text column
    pub text: Option<String>,
    /// Turn-order column
    pub turn: Option<String>,
    /// Speaker column
    pub speaker: Option<String>,
}

impl ColumnsConfig {
    /// Kind implied by the columns: chat when a turn column is named
    pub fn inferred_kind(&self) -> GroupKind {
        if self.turn.is_some() {
            GroupKind::Chat
        } else {
            GroupKind::Post
        }
    }
}

/// Transform options as written in the file; unset keys stay `None`
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TransformSection {
    /// Data kind; inferred from the turn column when unset
    pub kind: Option<GroupKind>,
    /// Statement granularity
    pub granularity: Option<Granularity>,
    /// Context policy
    pub context: Option<ContextPolicy>,
    /// Hashtag handling
    pub hashtags: Option<HashtagPolicy>,
    /// Speaker label for post×sentence rows
    pub post_speaker_label: Option<String>,
}

impl TransformSection {
    /// Fill unset keys from the engine defaults, using `kind` when the
    /// file names none
    pub fn resolve(&self, kind: GroupKind) -> TransformConfig {
        let defaults = TransformConfig::default();
        TransformConfig {
            kind: self.kind.unwrap_or(kind),
            granularity: self.granularity.unwrap_or(defaults.granularity),
            context: self.context.unwrap_or(defaults.context),
            hashtags: self.hashtags.unwrap_or(defaults.hashtags),
            post_speaker_label: self
                .post_speaker_label
                .clone()
                .unwrap_or(defaults.post_speaker_label),
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Execution mode
    pub execution_mode: ExecutionMode,

    /// Number of worker threads (0 = auto)
    pub threads: usize,

    /// Group count at which adaptive mode goes parallel
    pub parallel_threshold: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            execution_mode: engine.execution_mode,
            threads: 0,
            parallel_threshold: engine.parallel_threshold,
        }
    }
}

impl PerformanceConfig {
    /// Convert to the engine's execution settings
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            execution_mode: self.execution_mode,
            threads: (self.threads > 0).then_some(self.threads),
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl CliConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Transform options with the kind inferred from `[columns]` when unset
    pub fn transform_config(&self) -> TransformConfig {
        self.transform.resolve(self.columns.inferred_kind())
    }

    /// Check the transform options
    pub fn validate(&self) -> Result<()> {
        self.transform_config()
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.performance.to_engine_config().threads, None);
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::from_toml(
            r#"
[columns]
id = "chat_id"
text = "message"
turn = "turn_no"

[transform]
kind = "post"
granularity = "turn"
hashtags = "separate"
post_speaker_label = "author"

[transform.context]
policy = "rolling"
window_size = 4

[performance]
execution_mode = "parallel"
threads = 3
"#,
        )
        .unwrap();

        assert_eq!(config.columns.id.as_deref(), Some("chat_id"));
        assert_eq!(config.columns.speaker, None);
        let transform = config.transform_config();
        assert_eq!(transform.kind, GroupKind::Post);
        assert_eq!(transform.granularity, Granularity::Turn);
        assert_eq!(transform.context, ContextPolicy::rolling(4));
        assert_eq!(transform.hashtags, HashtagPolicy::Separate);
        assert_eq!(transform.post_speaker_label, "author");

        let engine = config.performance.to_engine_config();
        assert_eq!(engine.execution_mode, ExecutionMode::Parallel);
        assert_eq!(engine.threads, Some(3));
    }

    #[test]
    fn test_unset_kind_follows_turn_column() {
        let config = CliConfig::from_toml("[columns]\nid = \"a\"\ntext = \"b\"\n").unwrap();
        assert_eq!(config.transform.kind, None);
        assert_eq!(config.transform_config().kind, GroupKind::Post);

        let config =
            CliConfig::from_toml("[columns]\nid = \"a\"\ntext = \"b\"\nturn = \"t\"\n").unwrap();
        assert_eq!(config.transform_config().kind, GroupKind::Chat);

        let config = CliConfig::from_toml("[transform]\nkind = \"chat\"\n").unwrap();
        assert_eq!(config.transform_config().kind, GroupKind::Chat);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(CliConfig::from_toml("[transform]\nkind = \"forum\"\n").is_err());
        assert!(CliConfig::from_toml("[transform.context]\npolicy = \"rolling\"\nwindow_size = -1\n").is_err());
        assert!(CliConfig::from_toml("[unknown]\nx = 1\n").is_err());
        assert!(CliConfig::from_toml(
            "[transform]\nkind = \"post\"\npost_speaker_label = \"\"\n"
        )
        .is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[columns]\nid = \"x\"\ntext = \"y\"\n").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.columns.text.as_deref(), Some("y"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/recut.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

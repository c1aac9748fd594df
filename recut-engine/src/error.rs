//! Engine error types
//!
//! Configuration problems are the only fatal class: they are detected before
//! any row is processed, so a failing transform never yields partial output.
//! Empty results are reported through [`TransformReport`](crate::TransformReport)
//! instead of an error.

use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A required column is not present in the source table
    #[error("required {role} column '{name}' not found in input")]
    MissingColumn {
        /// Which role the column plays (`id` or `text`)
        role: &'static str,
        /// The column name the caller asked for
        name: String,
    },

    /// Invalid option value or option combination
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The source table itself is unusable
    #[error("invalid table: {reason}")]
    InvalidTable {
        /// Why the table was rejected
        reason: String,
    },

    /// Dedicated worker pool could not be created
    #[cfg(feature = "parallel")]
    #[error("thread pool creation failed: {0}")]
    ThreadPool(String),
}

impl EngineError {
    /// Shorthand for a [`EngineError::Config`] error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EngineError::Config(msg.into())
    }

    /// True for errors the caller caused through configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::MissingColumn { .. } | EngineError::Config(_)
        )
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = EngineError::MissingColumn {
            role: "text",
            name: "body".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "required text column 'body' not found in input"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_config_helper() {
        let err = EngineError::config("window size must not be negative");
        assert_eq!(
            err.to_string(),
            "invalid configuration: window size must not be negative"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_table_is_not_configuration() {
        let err = EngineError::InvalidTable {
            reason: "duplicate column 'id'".to_string(),
        };
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("duplicate column"));
    }
}

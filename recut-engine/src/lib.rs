//! Statement segmentation and context windowing for conversational tables
//!
//! This crate turns a table of chat turns or social posts into rows of the
//! schema `ID, Turn, Sentence, Speaker, Context, Statement`. Rows are grouped
//! by identifier, each group is segmented into statements according to the
//! selected [`Mode`], and every statement receives an inclusive context
//! window built by [`ContextWindowBuilder`].
//!
//! # Example
//!
//! ```rust
//! use recut_engine::{ColumnMapping, SourceTable, StatementProcessor, TransformConfig};
//!
//! let table = SourceTable::from_strings(
//!     ["chat", "turn", "who", "text"],
//!     vec![
//!         vec![Some("c1"), Some("1"), Some("A"), Some("Hi there. How are you?")],
//!         vec![Some("c1"), Some("2"), Some("B"), Some("I'm good! #happy")],
//!     ],
//! )
//! .unwrap();
//! let columns = ColumnMapping::new("chat", "text")
//!     .with_turn("turn")
//!     .with_speaker("who");
//!
//! let config = TransformConfig::builder().rolling(1).build().unwrap();
//! let output = StatementProcessor::with_config(config)
//!     .unwrap()
//!     .process(&table, &columns)
//!     .unwrap();
//!
//! assert_eq!(output.rows.len(), 4);
//! assert_eq!(output.rows[1].context, "Hi there. How are you?");
//! assert_eq!(output.rows[3].statement, "#happy");
//! ```

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod grouping;
pub mod mode;
pub mod processor;
pub mod table;

// Re-export key types
pub use assembler::{OutputRow, RowAssembler};
pub use config::{
    EngineConfig, Granularity, GroupKind, HashtagPolicy, TransformConfig, TransformConfigBuilder,
};
pub use context::{ContextPolicy, ContextWindow, ContextWindowBuilder};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use grouping::{Group, Turn, TurnKey};
pub use mode::{AtomicStatement, Mode};
pub use processor::{
    Output, StatementProcessor, StatementProcessorBuilder, TransformReport, TransformWarning,
};
pub use table::{Cell, ColumnMapping, SourceTable};

//! Statement processor and builder
//!
//! [`StatementProcessor`] is the single entry point of the engine: it takes a
//! [`SourceTable`] and a [`ColumnMapping`] and returns the standardized rows
//! together with a [`TransformReport`].

use crate::{
    assembler::{OutputRow, RowAssembler},
    config::{EngineConfig, TransformConfig},
    error::Result,
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    grouping::group_rows,
    mode::Mode,
    table::{ColumnMapping, SourceTable},
};
use serde::Serialize;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Non-fatal condition found during a transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformWarning {
    /// A group produced no statements after filtering
    EmptyGroup {
        /// Identifier of the group
        id: String,
    },
    /// The whole transform produced no rows
    EmptyResult,
}

impl std::fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformWarning::EmptyGroup { id } => {
                write!(f, "group '{id}' produced no statements")
            }
            TransformWarning::EmptyResult => f.write_str("no rows produced"),
        }
    }
}

/// Transform bookkeeping
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    /// Mode that produced the rows
    pub mode: Mode,
    /// Execution mode that was actually used
    pub execution_mode: ExecutionMode,
    /// Number of input rows
    pub input_rows: usize,
    /// Rows skipped because their identifier was missing
    pub skipped_rows: usize,
    /// Number of groups
    pub groups: usize,
    /// Number of output rows
    pub rows: usize,
    /// Non-fatal conditions, in group order
    pub warnings: Vec<TransformWarning>,
    /// Wall-clock processing time
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TransformReport {
    /// Identifiers of groups that produced no rows
    pub fn empty_groups(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().filter_map(|w| match w {
            TransformWarning::EmptyGroup { id } => Some(id.as_str()),
            TransformWarning::EmptyResult => None,
        })
    }
}

/// Rows plus report
#[derive(Debug, Clone)]
pub struct Output {
    /// Output rows in group then statement order
    pub rows: Vec<OutputRow>,
    /// Transform bookkeeping
    pub report: TransformReport,
}

impl Output {
    /// Check whether no row was produced
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Main statement processor
#[derive(Debug, Clone)]
pub struct StatementProcessor {
    assembler: RowAssembler,
    engine: EngineConfig,
}

impl Default for StatementProcessor {
    fn default() -> Self {
        Self {
            assembler: RowAssembler::new(TransformConfig::default()),
            engine: EngineConfig::default(),
        }
    }
}

impl StatementProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with the given transform options
    pub fn with_config(config: TransformConfig) -> Result<Self> {
        Self::with_configs(config, EngineConfig::default())
    }

    /// Create a processor with transform options and execution tuning
    pub fn with_configs(config: TransformConfig, engine: EngineConfig) -> Result<Self> {
        config.validate()?;
        engine.validate()?;
        Ok(Self {
            assembler: RowAssembler::new(config),
            engine,
        })
    }

    /// Start a builder
    pub fn builder() -> StatementProcessorBuilder {
        StatementProcessorBuilder::new()
    }

    /// Mode in use
    pub fn mode(&self) -> Mode {
        self.assembler.mode()
    }

    /// Execution settings in use
    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    /// Transform `table` using the columns named in `columns`
    ///
    /// Fails only on configuration problems, before any row is processed.
    pub fn process(&self, table: &SourceTable, columns: &ColumnMapping) -> Result<Output> {
        let start = Instant::now();
        let resolved = columns.resolve(table)?;
        let grouping = group_rows(table, &resolved);

        let execution_mode = self.select_mode(grouping.groups.len());
        let batches = self.run(execution_mode, &grouping.groups)?;

        let mut warnings = Vec::new();
        let mut rows = Vec::with_capacity(batches.iter().map(Vec::len).sum());
        for (group, batch) in grouping.groups.iter().zip(batches) {
            if batch.is_empty() {
                log::warn!("group '{}' produced no statements", group.id);
                warnings.push(TransformWarning::EmptyGroup {
                    id: group.id.clone(),
                });
            }
            rows.extend(batch);
        }
        if rows.is_empty() {
            log::warn!("transform produced no rows");
            warnings.push(TransformWarning::EmptyResult);
        }

        let report = TransformReport {
            mode: self.mode(),
            execution_mode,
            input_rows: table.len(),
            skipped_rows: grouping.skipped_rows,
            groups: grouping.groups.len(),
            rows: rows.len(),
            warnings,
            elapsed: start.elapsed(),
        };
        log::info!(
            "{} transform: {} group(s), {} row(s), {:?} execution",
            report.mode,
            report.groups,
            report.rows,
            report.execution_mode
        );

        Ok(Output { rows, report })
    }

    fn select_mode(&self, group_count: usize) -> ExecutionMode {
        match self.engine.execution_mode {
            ExecutionMode::Adaptive => auto_select(group_count, self.engine.parallel_threshold),
            #[cfg(not(feature = "parallel"))]
            ExecutionMode::Parallel => ExecutionMode::Sequential,
            mode => mode,
        }
    }

    fn run(
        &self,
        mode: ExecutionMode,
        groups: &[crate::grouping::Group],
    ) -> Result<Vec<Vec<OutputRow>>> {
        match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                let executor = match self.engine.threads {
                    Some(threads) => ParallelExecutor::with_threads(threads)?,
                    None => ParallelExecutor::new(),
                };
                executor.process(groups, &self.assembler)
            }
            _ => SequentialExecutor.process(groups, &self.assembler),
        }
    }
}

/// Builder for [`StatementProcessor`]
#[derive(Debug, Default)]
pub struct StatementProcessorBuilder {
    config: TransformConfig,
    engine: EngineConfig,
}

impl StatementProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transform options
    pub fn config(mut self, config: TransformConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the execution tuning
    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.engine.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.engine.threads = count;
        self
    }

    /// Set the group count at which adaptive mode goes parallel
    pub fn parallel_threshold(mut self, groups: usize) -> Self {
        self.engine.parallel_threshold = groups;
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<StatementProcessor> {
        StatementProcessor::with_configs(self.config, self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn table() -> SourceTable {
        SourceTable::from_strings(
            ["id", "text"],
            vec![
                vec![Some("a"), Some("One. Two.")],
                vec![Some("b"), Some("...")],
                vec![None, Some("orphan")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_report_counts_and_warnings() {
        let output = StatementProcessor::new()
            .process(&table(), &ColumnMapping::new("id", "text"))
            .unwrap();

        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.report.input_rows, 3);
        assert_eq!(output.report.skipped_rows, 1);
        assert_eq!(output.report.groups, 2);
        assert_eq!(output.report.rows, 2);
        assert_eq!(output.report.empty_groups().collect::<Vec<_>>(), vec!["b"]);
        assert!(!output.report.warnings.contains(&TransformWarning::EmptyResult));
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let err = StatementProcessor::new()
            .process(&table(), &ColumnMapping::new("id", "message"))
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingColumn { role: "text", .. }));
    }

    #[test]
    fn test_adaptive_selection() {
        let processor = StatementProcessor::builder()
            .parallel_threshold(usize::MAX)
            .build()
            .unwrap();
        assert_eq!(processor.select_mode(10_000), ExecutionMode::Sequential);

        let processor = StatementProcessor::builder()
            .execution_mode(ExecutionMode::Sequential)
            .build()
            .unwrap();
        assert_eq!(processor.select_mode(10_000), ExecutionMode::Sequential);
    }

    #[test]
    fn test_builder_rejects_zero_threads() {
        let err = StatementProcessor::builder()
            .threads(Some(0))
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_warning_display() {
        let warning = TransformWarning::EmptyGroup { id: "x".into() };
        assert_eq!(warning.to_string(), "group 'x' produced no statements");
        assert_eq!(TransformWarning::EmptyResult.to_string(), "no rows produced");
    }
}

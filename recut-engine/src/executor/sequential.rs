//! Sequential execution strategy

use crate::{
    assembler::{OutputRow, RowAssembler},
    error::Result,
    executor::{ExecutionMode, Executor},
    grouping::Group,
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn process(&self, groups: &[Group], assembler: &RowAssembler) -> Result<Vec<Vec<OutputRow>>> {
        Ok(groups.iter().map(|group| assembler.assemble(group)).collect())
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}

//! Parallel execution strategy

use crate::{
    assembler::{OutputRow, RowAssembler},
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
    grouping::Group,
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Parallel multi-threaded executor
///
/// Groups are mapped with an indexed parallel iterator, so the collected
/// batches keep the input group order.
#[derive(Debug, Default)]
pub struct ParallelExecutor {
    pool: Option<ThreadPool>,
}

impl ParallelExecutor {
    /// Create an executor on the global rayon pool
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Create an executor with a dedicated pool of `threads` workers
    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("recut-worker-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
        Ok(Self { pool: Some(pool) })
    }

    /// Number of worker threads that will be used
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    fn process_parallel(groups: &[Group], assembler: &RowAssembler) -> Vec<Vec<OutputRow>> {
        groups
            .par_iter()
            .map(|group| assembler.assemble(group))
            .collect()
    }
}

impl Executor for ParallelExecutor {
    fn process(&self, groups: &[Group], assembler: &RowAssembler) -> Result<Vec<Vec<OutputRow>>> {
        let batches = match &self.pool {
            Some(pool) => pool.install(|| Self::process_parallel(groups, assembler)),
            None => Self::process_parallel(groups, assembler),
        };
        Ok(batches)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

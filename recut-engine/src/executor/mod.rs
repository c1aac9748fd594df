//! Execution strategies for per-group processing
//!
//! Groups are independent of each other, so they can be assembled in any
//! order or in parallel. Every executor returns one row batch per group in
//! the order the groups were given.

use crate::assembler::{OutputRow, RowAssembler};
use crate::error::Result;
use crate::grouping::Group;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Single-threaded processing
    Sequential,
    /// Multi-threaded processing, one task per group
    Parallel,
    /// Pick sequential or parallel from the group count
    Adaptive,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Assemble the rows of every group, preserving group order
    fn process(&self, groups: &[Group], assembler: &RowAssembler) -> Result<Vec<Vec<OutputRow>>>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Automatically select execution mode based on the number of groups
pub fn auto_select(group_count: usize, threshold: usize) -> ExecutionMode {
    if group_count < 2 || group_count < threshold || !cfg!(feature = "parallel") {
        ExecutionMode::Sequential
    } else {
        ExecutionMode::Parallel
    }
}

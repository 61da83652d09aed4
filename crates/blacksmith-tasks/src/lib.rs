//! Blacksmith Tasks - Release task graph and runner
//!
//! Tasks declare ordered prerequisites. The runner resolves a target's
//! closure depth-first in declared order and runs every task at most once
//! per invocation.

pub mod dag;
pub mod reporter;
pub mod runner;
pub mod table;
pub mod task;

pub use dag::{DagError, TaskGraph};
pub use reporter::{CollectingReporter, TaskEvent, TaskReporter, TracingReporter};
pub use runner::{RunError, RunSummary, TaskExecutor, TaskRunner};
pub use table::standard_tasks;
pub use task::{TaskDefinition, TaskId};

// src/task/mod.rs

//! Units of work that can be placed on a [`TaskGraph`](crate::dag::TaskGraph).
//!
//! A task kind implements [`Task`]: it declares the parameters it needs
//! ([`Task::parameter_types`]) and performs its work in [`Task::run_job`],
//! using the [`JobContext`] to read its own parameters and, if it wants to,
//! forward them to the tasks downstream of it.
//!
//! - [`context`] holds the job-side view of the graph.
//! - [`registry`] maps kind names (as used in pipeline files) to tasks.
//! - [`builtin`] ships the kinds available out of the box.

pub mod builtin;
pub mod context;
pub mod registry;

pub use context::JobContext;
pub use registry::TaskRegistry;

use crate::params::TypeContract;

/// A kind of task.
///
/// Implementations are shared between every node of that kind (nodes hold an
/// `Arc<dyn Task>`), so per-run state belongs in the node's parameters, not in
/// the task value itself.
pub trait Task: Send + Sync {
    /// Kind name, e.g. `"print"`.
    fn kind(&self) -> &str;

    /// Parameters this kind requires, checked before every execution attempt.
    fn parameter_types(&self) -> TypeContract;

    /// Perform the work of one node.
    ///
    /// Returning `Err` aborts the whole cascade; the node stays unfinished.
    fn run_job(&self, ctx: &mut JobContext<'_>) -> anyhow::Result<()>;
}

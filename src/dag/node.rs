// src/dag/node.rs

use std::fmt;
use std::sync::Arc;

use crate::params::{ParameterStore, TypeContract};
use crate::task::Task;

/// Handle to a node inside a [`TaskGraph`](crate::dag::TaskGraph).
///
/// Handles are plain indices; neighbours refer to each other through them
/// rather than through owning references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex of the task graph.
pub struct TaskNode {
    /// Label used in logs and error messages. Not required to be unique.
    pub(crate) name: String,
    pub(crate) task: Arc<dyn Task>,
    pub(crate) parameters: ParameterStore,
    /// Set once, after the task's work succeeded. Never reset.
    pub(crate) finished: bool,
    /// Nodes this one depends on, in insertion order.
    pub(crate) upstream: Vec<NodeId>,
    /// Nodes depending on this one, in insertion order.
    pub(crate) downstream: Vec<NodeId>,
}

impl TaskNode {
    pub(crate) fn new(name: String, task: Arc<dyn Task>, parameters: ParameterStore) -> Self {
        Self {
            name,
            task,
            parameters,
            finished: false,
            upstream: Vec::new(),
            downstream: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        self.task.kind()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn parameter_types(&self) -> TypeContract {
        self.task.parameter_types()
    }

    pub fn upstream(&self) -> &[NodeId] {
        &self.upstream
    }

    pub fn downstream(&self) -> &[NodeId] {
        &self.downstream
    }

    pub fn is_source(&self) -> bool {
        self.upstream.is_empty()
    }
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("name", &self.name)
            .field("kind", &self.task.kind())
            .field("parameters", &self.parameters)
            .field("finished", &self.finished)
            .field("upstream", &self.upstream)
            .field("downstream", &self.downstream)
            .finish()
    }
}

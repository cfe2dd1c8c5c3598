// src/task/registry.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::task::builtin::{PrintForwardTask, PrintTask};
use crate::task::Task;

/// Lookup table from kind name to task implementation.
///
/// Pipeline files refer to tasks by `kind = "..."`; the registry resolves
/// those names when a graph is assembled.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    kinds: BTreeMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in kinds (`print`, `print_forward`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PrintTask));
        registry.register(Arc::new(PrintForwardTask));
        registry
    }

    /// Register a task under its own [`Task::kind`] name, replacing any
    /// previous registration of that name.
    pub fn register(&mut self, task: Arc<dyn Task>) {
        self.kinds.insert(task.kind().to_string(), task);
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn Task>> {
        self.kinds.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(|s| s.as_str())
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.kinds.keys()).finish()
    }
}

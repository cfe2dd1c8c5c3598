#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use taskdag::params::{ParamType, ParameterStore, TypeContract};
use taskdag::task::{JobContext, Task};

/// One recorded `run_job` call.
#[derive(Debug, Clone)]
pub struct Execution {
    pub node: String,
    /// The node's parameters as seen when its job started.
    pub parameters: ParameterStore,
}

/// Shared, append-only record of job executions across a graph.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<Execution>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node names in execution order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.node.clone())
            .collect()
    }

    pub fn entries(&self) -> Vec<Execution> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, node: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.node == node)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    fn push(&self, execution: Execution) {
        self.entries.lock().unwrap().push(execution);
    }
}

/// A configurable task kind that records every execution.
///
/// - `require` adds entries to its type contract.
/// - `forwarding` makes it transmit its parameters downstream.
/// - `failing` makes its job return an error (after recording the call).
#[derive(Debug, Clone)]
pub struct RecordingTask {
    kind: String,
    contract: TypeContract,
    forward: bool,
    failure: Option<String>,
    log: ExecutionLog,
}

impl RecordingTask {
    pub fn new(log: &ExecutionLog) -> Self {
        Self {
            kind: "record".to_string(),
            contract: TypeContract::new(),
            forward: false,
            failure: None,
            log: log.clone(),
        }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn require(mut self, name: &str, ty: ParamType) -> Self {
        self.contract = self.contract.require(name, ty);
        self
    }

    pub fn forwarding(mut self) -> Self {
        self.forward = true;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn into_arc(self) -> Arc<dyn Task> {
        Arc::new(self)
    }
}

impl Task for RecordingTask {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn parameter_types(&self) -> TypeContract {
        self.contract.clone()
    }

    fn run_job(&self, ctx: &mut JobContext<'_>) -> anyhow::Result<()> {
        self.log.push(Execution {
            node: ctx.name().to_string(),
            parameters: ctx.parameters().clone(),
        });

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        if self.forward {
            ctx.transmit_parameters();
        }
        Ok(())
    }
}

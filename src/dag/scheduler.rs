// src/dag/scheduler.rs

//! Readiness-check-and-run cascade.
//!
//! There is no central topological sort and no ready queue. Triggering a node
//! checks whether all of its upstream nodes have finished; if so the node's
//! type contract is checked, its job runs, it is marked finished, and each of
//! its downstream nodes is triggered in turn. A node with several parents is
//! therefore re-checked once per finishing parent and only runs on the check
//! that sees all of them finished.
//!
//! The cascade is driven by an explicit LIFO work list instead of recursion.
//! Downstream nodes are pushed in reverse so they pop in insertion order, which
//! reproduces the depth-first order of the recursive formulation exactly
//! (including the order in which propagated parameters overwrite each other).

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::node::NodeId;
use crate::errors::{DagError, Result};
use crate::task::JobContext;

/// What happened during one or more [`TaskGraph::run`] cascades.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Nodes whose job ran, in execution order.
    pub executed: Vec<NodeId>,
    /// Triggers that found an upstream node still unfinished.
    pub deferred: usize,
    /// Triggers that hit a node which had already finished.
    pub skipped: usize,
}

impl RunReport {
    fn absorb(&mut self, other: RunReport) {
        self.executed.extend(other.executed);
        self.deferred += other.deferred;
        self.skipped += other.skipped;
    }
}

/// Outcome of triggering a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Executed,
    NotReady,
    AlreadyFinished,
}

impl TaskGraph {
    /// Trigger `start` and cascade through everything that becomes ready.
    ///
    /// Triggering a node whose upstream nodes have not all finished does
    /// nothing and is not an error. The first contract violation or job
    /// failure aborts the cascade and is returned; nodes that finished before
    /// it stay finished.
    pub fn run(&mut self, start: NodeId) -> Result<RunReport> {
        self.node(start)?;

        let mut report = RunReport::default();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            match self.trigger(id)? {
                Trigger::Executed => {
                    report.executed.push(id);
                    stack.extend(self.node_ref(id).downstream.iter().rev().copied());
                }
                Trigger::NotReady => report.deferred += 1,
                Trigger::AlreadyFinished => report.skipped += 1,
            }
        }

        Ok(report)
    }

    /// Trigger each of `starts` in order, stopping at the first error.
    pub fn run_from(&mut self, starts: &[NodeId]) -> Result<RunReport> {
        let mut report = RunReport::default();
        for &start in starts {
            report.absorb(self.run(start)?);
        }
        Ok(report)
    }

    /// Trigger every source node (no upstream), in insertion order.
    pub fn run_sources(&mut self) -> Result<RunReport> {
        let sources = self.source_nodes();
        info!(count = sources.len(), "triggering source nodes");
        self.run_from(&sources)
    }

    fn trigger(&mut self, id: NodeId) -> Result<Trigger> {
        let node = self.node_ref(id);

        if node.finished {
            debug!(node = %node.name, "already finished; skipping");
            return Ok(Trigger::AlreadyFinished);
        }

        if let Some(waiting_on) = node
            .upstream
            .iter()
            .find(|up| !self.node_ref(**up).finished)
        {
            debug!(
                node = %node.name,
                waiting_on = %self.node_ref(*waiting_on).name,
                "upstream not finished; deferring"
            );
            return Ok(Trigger::NotReady);
        }

        let name = node.name.clone();
        let task = Arc::clone(&node.task);

        task.parameter_types().check(&name, &node.parameters)?;

        info!(node = %name, kind = task.kind(), "running task");

        let mut ctx = JobContext::new(self, id);
        if let Err(err) = task.run_job(&mut ctx) {
            warn!(node = %name, error = %err, "task failed; aborting cascade");
            return Err(DagError::from_job(&name, err));
        }

        self.node_mut(id).finished = true;
        debug!(node = %name, "task finished");

        Ok(Trigger::Executed)
    }
}

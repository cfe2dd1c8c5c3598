// src/dag/mod.rs

//! Task graph and execution.
//!
//! - [`node`] is a single vertex: task, parameters, completion flag and
//!   neighbour handles.
//! - [`graph`] owns the nodes and the upstream/downstream linkage.
//! - [`scheduler`] is the readiness-check-and-run cascade started by
//!   [`TaskGraph::run`].

pub mod graph;
pub mod node;
pub mod scheduler;

pub use graph::TaskGraph;
pub use node::{NodeId, TaskNode};
pub use scheduler::RunReport;

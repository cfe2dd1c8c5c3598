// src/dag/graph.rs

use std::sync::Arc;

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::dag::node::{NodeId, TaskNode};
use crate::errors::{DagError, Result};
use crate::params::{ParameterStore, TypeContract};
use crate::task::Task;

/// Arena of task nodes plus their upstream/downstream linkage.
///
/// Nodes are addressed by [`NodeId`]. Each node keeps its own ordered
/// neighbour lists (these drive execution order); a petgraph mirror of the
/// edges is kept alongside for cycle checks and topological ordering.
#[derive(Debug, Default)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    edges: DiGraphMap<NodeId, ()>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unlinked node running `task` with the given initial parameters.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        task: Arc<dyn Task>,
        parameters: ParameterStore,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = name.into();
        debug!(node = %name, kind = task.kind(), id = id.0, "added node");
        self.nodes.push(TaskNode::new(name, task, parameters));
        self.edges.add_node(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&TaskNode> {
        self.nodes.get(id.0).ok_or(DagError::UnknownNode(id.0))
    }

    /// All node ids, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// First node carrying the given label.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Make `to` depend on `from`.
    ///
    /// Adding an edge that already exists is a no-op. An edge that would close
    /// a cycle (including `from == to`) is rejected and the graph is left
    /// untouched.
    pub fn add_downstream(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.node(from)?;
        self.node(to)?;

        if self.nodes[from.0].downstream.contains(&to) {
            return Ok(());
        }

        let closes_cycle = from == to
            || (!self.nodes[to.0].downstream.is_empty()
                && has_path_connecting(&self.edges, to, from, None));
        if closes_cycle {
            return Err(DagError::Cycle(format!(
                "linking '{}' -> '{}' would create a cycle",
                self.nodes[from.0].name, self.nodes[to.0].name
            )));
        }

        self.nodes[from.0].downstream.push(to);
        self.nodes[to.0].upstream.push(from);
        self.edges.add_edge(from, to, ());

        debug!(
            from = %self.nodes[from.0].name,
            to = %self.nodes[to.0].name,
            "linked nodes"
        );
        Ok(())
    }

    /// Chain `from -> chain[0] -> chain[1] -> ...`.
    pub fn add_serial_pipeline(&mut self, from: NodeId, chain: &[NodeId]) -> Result<()> {
        let mut prev = from;
        for &next in chain {
            self.add_downstream(prev, next)?;
            prev = next;
        }
        Ok(())
    }

    pub fn upstream_of(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.upstream())
    }

    pub fn downstream_of(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.downstream())
    }

    pub fn is_finished(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.finished)
    }

    pub fn parameters(&self, id: NodeId) -> Result<&ParameterStore> {
        Ok(self.node(id)?.parameters())
    }

    /// Owner access to a node's store, e.g. to seed values after construction.
    pub fn parameters_mut(&mut self, id: NodeId) -> Result<&mut ParameterStore> {
        self.node(id)?;
        Ok(&mut self.nodes[id.0].parameters)
    }

    pub fn parameter_types(&self, id: NodeId) -> Result<TypeContract> {
        Ok(self.node(id)?.parameter_types())
    }

    /// Nodes without upstream dependencies, in insertion order.
    pub fn source_nodes(&self) -> Vec<NodeId> {
        self.node_ids()
            .filter(|id| self.nodes[id.0].is_source())
            .collect()
    }

    /// Nodes whose work has completed, in insertion order.
    pub fn finished_nodes(&self) -> Vec<NodeId> {
        self.node_ids()
            .filter(|id| self.nodes[id.0].finished)
            .collect()
    }

    /// A dependency-respecting order of all nodes.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        toposort(&self.edges, None).map_err(|cycle| {
            let id = cycle.node_id();
            DagError::Cycle(format!(
                "cycle detected in task graph involving task '{}'",
                self.nodes[id.0].name
            ))
        })
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> &TaskNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TaskNode {
        &mut self.nodes[id.0]
    }
}

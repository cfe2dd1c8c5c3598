// src/task/context.rs

use tracing::debug;

use crate::dag::{NodeId, TaskGraph};
use crate::errors::{DagError, Result};
use crate::params::{ParamType, ParamValue, ParameterStore};

/// What a running job can see and touch.
///
/// A job has read/write access to its own parameter store and write access to
/// the stores of its direct downstream nodes through
/// [`JobContext::transmit_parameters`]. Nothing else in the graph is reachable.
pub struct JobContext<'a> {
    graph: &'a mut TaskGraph,
    id: NodeId,
}

impl<'a> JobContext<'a> {
    pub(crate) fn new(graph: &'a mut TaskGraph, id: NodeId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Label of the running node.
    pub fn name(&self) -> &str {
        &self.graph.node_ref(self.id).name
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.graph.node_ref(self.id).parameters
    }

    pub fn downstream(&self) -> &[NodeId] {
        &self.graph.node_ref(self.id).downstream
    }

    /// Read a parameter of the running node.
    pub fn get_parameter(&self, name: &str) -> Result<&ParamValue> {
        self.parameters().get_parameter(name)
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        let value = self.get_parameter(name)?;
        value
            .as_int()
            .ok_or_else(|| self.wrong_type(name, ParamType::Int, value))
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        let value = self.get_parameter(name)?;
        value
            .as_float()
            .ok_or_else(|| self.wrong_type(name, ParamType::Float, value))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let value = self.get_parameter(name)?;
        value
            .as_bool()
            .ok_or_else(|| self.wrong_type(name, ParamType::Bool, value))
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        let value = self.get_parameter(name)?;
        value
            .as_str()
            .ok_or_else(|| self.wrong_type(name, ParamType::Str, value))
    }

    pub fn get_list(&self, name: &str) -> Result<&[ParamValue]> {
        let value = self.get_parameter(name)?;
        value
            .as_list()
            .ok_or_else(|| self.wrong_type(name, ParamType::List, value))
    }

    /// Insert or overwrite a parameter of the running node.
    pub fn set_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.graph
            .node_mut(self.id)
            .parameters
            .set_parameter(name, value)
    }

    /// Copy every parameter of the running node into each downstream node,
    /// overwriting same-named keys there.
    pub fn transmit_parameters(&mut self) {
        let downstream = self.downstream().to_vec();
        for target in downstream {
            self.copy_parameters_into(target);
        }
    }

    /// Like [`JobContext::transmit_parameters`], for a single downstream node.
    pub fn transmit_parameters_to(&mut self, target: NodeId) -> Result<()> {
        if !self.downstream().contains(&target) {
            let target_name = match self.graph.node(target) {
                Ok(node) => node.name.clone(),
                Err(_) => target.to_string(),
            };
            return Err(DagError::NotDownstream {
                node: self.name().to_string(),
                target: target_name,
            });
        }
        self.copy_parameters_into(target);
        Ok(())
    }

    fn copy_parameters_into(&mut self, target: NodeId) {
        let snapshot = self.parameters().clone();
        let node = self.graph.node_mut(target);
        node.parameters.merge_from(&snapshot);
        debug!(
            target = %node.name,
            count = snapshot.len(),
            "transmitted parameters downstream"
        );
    }

    fn wrong_type(&self, name: &str, expected: ParamType, value: &ParamValue) -> DagError {
        DagError::WrongParameterType {
            node: self.name().to_string(),
            name: name.to_string(),
            expected,
            found: value.param_type(),
        }
    }
}

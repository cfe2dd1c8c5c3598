// src/pipeline.rs

//! Turning a validated pipeline file into a runnable [`TaskGraph`].

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::model::ConfigFile;
use crate::config::source_parameters;
use crate::dag::{NodeId, RunReport, TaskGraph};
use crate::errors::{DagError, Result};
use crate::task::TaskRegistry;

/// A task graph built from a pipeline file, with the task-name -> node mapping.
#[derive(Debug)]
pub struct Pipeline {
    graph: TaskGraph,
    ids: BTreeMap<String, NodeId>,
    env: Option<String>,
}

impl Pipeline {
    /// Build the graph for `cfg`.
    ///
    /// Nodes are created in task-name order and linked along every `after`
    /// entry. Source tasks start with `[params]` plus the overlay of
    /// `env_name`, then their own `params`; other tasks start with their own
    /// `params` only.
    pub fn build(cfg: &ConfigFile, registry: &TaskRegistry, env_name: Option<&str>) -> Result<Self> {
        let seed = source_parameters(cfg, env_name)?;

        let mut graph = TaskGraph::new();
        let mut ids = BTreeMap::new();

        for (name, tc) in cfg.task().iter() {
            let task = registry.get(&tc.kind).ok_or_else(|| {
                let known: Vec<&str> = registry.kinds().collect();
                DagError::ConfigError(format!(
                    "task '{}' has unknown kind '{}' (registered: {:?})",
                    name, tc.kind, known
                ))
            })?;

            let params = if tc.after.is_empty() {
                let mut params = seed.clone();
                params.merge_from(&tc.params);
                params
            } else {
                tc.params.clone()
            };

            let id = graph.add_node(name.clone(), task, params);
            ids.insert(name.clone(), id);
        }

        for (name, tc) in cfg.task().iter() {
            let to = ids[name];
            for dep in tc.after.iter() {
                let from = *ids
                    .get(dep)
                    .ok_or_else(|| DagError::UnknownTask(dep.clone()))?;
                graph.add_downstream(from, to)?;
            }
        }

        info!(
            tasks = graph.len(),
            env = env_name.unwrap_or("<none>"),
            "pipeline assembled"
        );

        Ok(Self {
            graph,
            ids,
            env: env_name.map(str::to_string),
        })
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut TaskGraph {
        &mut self.graph
    }

    /// Environment the source parameters were resolved for.
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    pub fn id_of(&self, task: &str) -> Result<NodeId> {
        self.ids
            .get(task)
            .copied()
            .ok_or_else(|| DagError::UnknownTask(task.to_string()))
    }

    /// Run the cascade from a single named task, or from every source task.
    pub fn run(&mut self, start: Option<&str>) -> Result<RunReport> {
        let report = match start {
            Some(task) => {
                let id = self.id_of(task)?;
                debug!(task = %task, "running cascade from a single task");
                self.graph.run(id)?
            }
            None => self.graph.run_sources()?,
        };
        Ok(report)
    }

    /// Names of tasks that have finished, in task-name order.
    pub fn finished_tasks(&self) -> Vec<&str> {
        self.names_where(true)
    }

    /// Names of tasks that have not finished, in task-name order.
    pub fn unfinished_tasks(&self) -> Vec<&str> {
        self.names_where(false)
    }

    fn names_where(&self, finished: bool) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|(_, id)| self.graph.is_finished(**id).unwrap_or(false) == finished)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Print environment, tasks in dependency order, their contracts and
    /// initial parameters. Executes nothing.
    pub fn print_dry_run(&self) -> Result<()> {
        println!("taskdag dry-run");
        println!("  env = {}", self.env.as_deref().unwrap_or("<none>"));
        println!();

        let order = self.graph.topological_order()?;
        println!("tasks ({}):", order.len());

        for id in order {
            let node = self.graph.node(id)?;
            println!("  - {}", node.name());
            println!("      kind: {}", node.kind());

            if !node.upstream().is_empty() {
                let after = node
                    .upstream()
                    .iter()
                    .map(|up| self.graph.node(*up).map(|n| n.name()))
                    .collect::<Result<Vec<_>>>()?;
                println!("      after: {:?}", after);
            }

            let contract = node.parameter_types();
            if !contract.is_empty() {
                let required: Vec<String> = contract
                    .iter()
                    .map(|(name, ty)| format!("{name}: {ty}"))
                    .collect();
                println!("      requires: {}", required.join(", "));
            }

            for (name, value) in node.parameters().iter() {
                println!("      param {name} = {value}");
            }
        }

        debug!("dry-run complete (no execution)");
        Ok(())
    }
}

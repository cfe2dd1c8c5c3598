// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::params::ParamType;

#[derive(Error, Debug)]
pub enum DagError {
    #[error("task '{node}' is missing required parameter '{name}'")]
    MissingParameter { node: String, name: String },

    #[error("parameter '{name}' of task '{node}' is not of type {expected} (found {found})")]
    WrongParameterType {
        node: String,
        name: String,
        expected: ParamType,
        found: ParamType,
    },

    #[error("task '{node}' failed: {source}")]
    TaskFailed {
        node: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("task '{target}' is not downstream of task '{node}'")]
    NotDownstream { node: String, target: String },

    #[error("Node not found: {0}")]
    UnknownNode(usize),

    #[error("Task not found: {0}")]
    UnknownTask(String),

    #[error("Cycle detected in DAG: {0}")]
    Cycle(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DagError {
    /// Wrap the error returned by a task body.
    ///
    /// Engine errors raised from inside a job (e.g. reading a parameter that
    /// is not in the store) are surfaced unchanged rather than nested.
    pub fn from_job(node: &str, err: anyhow::Error) -> Self {
        match err.downcast::<DagError>() {
            Ok(inner) => inner,
            Err(other) => DagError::TaskFailed {
                node: node.to_string(),
                source: other.into(),
            },
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DagError>;

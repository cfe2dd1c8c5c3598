// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::params::ParameterStore;

/// Pipeline file exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [config]
/// default_env = "prd"
///
/// [params]
/// a = 1
///
/// [env.dev.params]
/// debug = true
///
/// [env.prd.params]
/// debug = false
///
/// [task.first]
/// kind = "print_forward"
///
/// [task.second]
/// kind = "print"
/// after = ["first"]
/// ```
///
/// All sections except `[task.<name>]` are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Global settings from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Base parameters handed to every source task, from `[params]`.
    #[serde(default)]
    pub params: ParameterStore,

    /// Named environments from `[env.<name>]`.
    #[serde(default)]
    pub env: BTreeMap<String, EnvSection>,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// A validated pipeline file.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `config::validate`),
/// so holding one means dependencies resolve, the task graph is acyclic and
/// `default_env` (if any) names a defined environment.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    params: ParameterStore,
    env: BTreeMap<String, EnvSection>,
    task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            config: raw.config,
            params: raw.params,
            env: raw.env,
            task: raw.task,
        }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn env(&self) -> &BTreeMap<String, EnvSection> {
        &self.env
    }

    pub fn task(&self) -> &BTreeMap<String, TaskConfig> {
        &self.task
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// Environment used when neither `--env` nor `APP_ENV` selects one.
    #[serde(default)]
    pub default_env: Option<String>,
}

/// `[env.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvSection {
    /// Parameters layered over `[params]` for source tasks when this
    /// environment is selected.
    #[serde(default)]
    pub params: ParameterStore,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Registered task kind, e.g. `"print"`.
    pub kind: String,

    /// This task waits for every task listed here (`after = ["A", "B"]`).
    #[serde(default)]
    pub after: Vec<String>,

    /// Task-local initial parameters; these win over `[params]` and the
    /// environment overlay.
    #[serde(default)]
    pub params: ParameterStore,
}

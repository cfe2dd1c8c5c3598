#![allow(dead_code)]

use std::collections::BTreeMap;

use taskdag::config::{ConfigFile, ConfigSection, EnvSection, RawConfigFile, TaskConfig};
use taskdag::params::{ParamValue, ParameterStore};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                params: ParameterStore::new(),
                env: BTreeMap::new(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.config.params.set_parameter(name, value);
        self
    }

    pub fn with_env_param(mut self, env: &str, name: &str, value: impl Into<ParamValue>) -> Self {
        self.config
            .env
            .entry(env.to_string())
            .or_insert_with(EnvSection::default)
            .params
            .set_parameter(name, value);
        self
    }

    pub fn with_default_env(mut self, env: &str) -> Self {
        self.config.config.default_env = Some(env.to_string());
        self
    }

    /// The unvalidated config, for tests that exercise validation itself.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(kind: &str) -> Self {
        Self {
            task: TaskConfig {
                kind: kind.to_string(),
                after: vec![],
                params: ParameterStore::new(),
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.task.params.set_parameter(name, value);
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

// src/config/env.rs

//! Environment selection and source-parameter resolution.
//!
//! Priority for choosing the environment:
//! 1. `--env` CLI flag (if provided)
//! 2. `APP_ENV` environment variable (if set and non-empty)
//! 3. `[config].default_env`
//! 4. none: only `[params]` applies

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::{DagError, Result};
use crate::params::ParameterStore;

/// Environment variable consulted when no `--env` flag is given.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Resolve the environment name using the process environment.
pub fn resolve_env_name(cli_env: Option<&str>, cfg: &ConfigFile) -> Option<String> {
    let from_var = std::env::var(APP_ENV_VAR).ok();
    resolve_env_name_with(cli_env, from_var.as_deref(), cfg)
}

/// Resolve the environment name from explicit inputs.
pub fn resolve_env_name_with(
    cli_env: Option<&str>,
    app_env: Option<&str>,
    cfg: &ConfigFile,
) -> Option<String> {
    let non_empty = |s: &&str| !s.trim().is_empty();

    cli_env
        .filter(non_empty)
        .or_else(|| app_env.filter(non_empty))
        .or(cfg.config().default_env.as_deref())
        .map(|s| s.trim().to_string())
}

/// Parameters a source task starts with before its own `params` are applied:
/// `[params]` overlaid with `[env.<env_name>.params]`.
///
/// Naming an environment that the file does not define is an error.
pub fn source_parameters(cfg: &ConfigFile, env_name: Option<&str>) -> Result<ParameterStore> {
    let mut params = cfg.params().clone();

    if let Some(name) = env_name {
        let section = cfg.env().get(name).ok_or_else(|| {
            let known: Vec<&str> = cfg.env().keys().map(|k| k.as_str()).collect();
            DagError::ConfigError(format!(
                "unknown environment '{}' (defined: {:?})",
                name, known
            ))
        })?;
        params.merge_from(&section.params);
        debug!(env = %name, overlay = section.params.len(), "applied environment overlay");
    }

    Ok(params)
}

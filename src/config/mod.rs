// src/config/mod.rs

//! Pipeline file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a pipeline file from disk (`loader.rs`).
//! - Validate dependencies, acyclicity and environments (`validate.rs`).
//! - Pick the active environment and compute source parameters (`env.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod validate;

pub use env::{resolve_env_name, resolve_env_name_with, source_parameters, APP_ENV_VAR};
pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{ConfigFile, ConfigSection, EnvSection, RawConfigFile, TaskConfig};

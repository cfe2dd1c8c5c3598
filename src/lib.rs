// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod params;
pub mod pipeline;
pub mod task;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, resolve_env_name};
use crate::pipeline::Pipeline;
use crate::task::TaskRegistry;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - pipeline file loading + validation
/// - environment selection
/// - graph assembly from the built-in task registry
/// - the execution cascade (or the dry-run printout)
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)
        .with_context(|| format!("loading pipeline file {:?}", args.config))?;

    let env = resolve_env_name(args.env.as_deref(), &cfg);
    let registry = TaskRegistry::with_builtins();
    let mut pipeline = Pipeline::build(&cfg, &registry, env.as_deref())?;

    if args.dry_run {
        pipeline.print_dry_run()?;
        return Ok(());
    }

    match pipeline.run(args.task.as_deref()) {
        Ok(report) => {
            let not_run = pipeline.unfinished_tasks();
            info!(
                executed = report.executed.len(),
                deferred = report.deferred,
                ?not_run,
                "pipeline run complete"
            );
            Ok(())
        }
        Err(err) => {
            warn!(
                finished = ?pipeline.finished_tasks(),
                unfinished = ?pipeline.unfinished_tasks(),
                "pipeline aborted"
            );
            Err(err.into())
        }
    }
}

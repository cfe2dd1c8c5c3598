// src/task/builtin.rs

//! Task kinds available without registering anything.
//!
//! Both print the integer parameter `a` to stdout; `print_forward` also hands
//! all of its parameters to the tasks downstream of it.

use tracing::debug;

use crate::params::{ParamType, TypeContract};
use crate::task::{JobContext, Task};

/// `kind = "print"`: print `a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintTask;

impl Task for PrintTask {
    fn kind(&self) -> &str {
        "print"
    }

    fn parameter_types(&self) -> TypeContract {
        TypeContract::new().require("a", ParamType::Int)
    }

    fn run_job(&self, ctx: &mut JobContext<'_>) -> anyhow::Result<()> {
        let a = ctx.get_int("a")?;
        println!("{a}");
        Ok(())
    }
}

/// `kind = "print_forward"`: print `a`, then transmit parameters downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintForwardTask;

impl Task for PrintForwardTask {
    fn kind(&self) -> &str {
        "print_forward"
    }

    fn parameter_types(&self) -> TypeContract {
        TypeContract::new().require("a", ParamType::Int)
    }

    fn run_job(&self, ctx: &mut JobContext<'_>) -> anyhow::Result<()> {
        let a = ctx.get_int("a")?;
        println!("{a}");

        debug!(
            task = %ctx.name(),
            downstream = ctx.downstream().len(),
            "forwarding parameters"
        );
        ctx.transmit_parameters();
        Ok(())
    }
}

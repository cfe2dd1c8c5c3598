// src/params/mod.rs

//! Task parameters.
//!
//! - [`value`] defines the tagged-union value type carried by the graph.
//! - [`store`] is the per-node name -> value mapping.
//! - [`contract`] declares which parameters a task kind requires, and checks a
//!   store against that declaration before the task runs.

pub mod contract;
pub mod store;
pub mod value;

pub use contract::TypeContract;
pub use store::ParameterStore;
pub use value::{ParamType, ParamValue};

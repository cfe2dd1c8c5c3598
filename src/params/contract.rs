// src/params/contract.rs

use crate::errors::{DagError, Result};
use crate::params::store::ParameterStore;
use crate::params::value::ParamType;

/// Required parameter names and their expected types for a task kind.
///
/// Entries are checked in declaration order, so the first violation reported
/// is deterministic. Parameters present in the store but not declared here are
/// ignored by [`TypeContract::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeContract {
    required: Vec<(String, ParamType)>,
}

impl TypeContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required parameter. Re-declaring a name replaces its type.
    pub fn require(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        let name = name.into();
        match self.required.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = ty,
            None => self.required.push((name, ty)),
        }
        self
    }

    pub fn expected_type(&self, name: &str) -> Option<ParamType> {
        self.required
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ty)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamType)> {
        self.required.iter().map(|(n, ty)| (n.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    /// Check `params` against this contract on behalf of task `node`.
    pub fn check(&self, node: &str, params: &ParameterStore) -> Result<()> {
        for (name, expected) in self.required.iter() {
            let value = params.get(name).ok_or_else(|| DagError::MissingParameter {
                node: node.to_string(),
                name: name.clone(),
            })?;

            let found = value.param_type();
            if found != *expected {
                return Err(DagError::WrongParameterType {
                    node: node.to_string(),
                    name: name.clone(),
                    expected: *expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

// src/params/store.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{DagError, Result};
use crate::params::value::ParamValue;

/// Name -> value mapping owned by a single task node.
///
/// Keys are kept sorted so that iteration (and therefore dry-run output and
/// propagation) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy when constructing nodes.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Look up a parameter by name.
    ///
    /// Reading a name that is not in the store is an error, never a default.
    pub fn get_parameter(&self, name: &str) -> Result<&ParamValue> {
        self.values
            .get(name)
            .ok_or_else(|| DagError::ParameterNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Insert or overwrite a parameter, returning the previous value.
    pub fn set_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every entry of `other` into `self`, overwriting same-named keys.
    pub fn merge_from(&mut self, other: &ParameterStore) {
        for (name, value) in other.values.iter() {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterStore
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = ParameterStore::new();
        for (name, value) in iter {
            store.set_parameter(name, value);
        }
        store
    }
}

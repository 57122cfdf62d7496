//! Named parameter container shared with the engine binding.
//!
//! The engine's file readers populate this container and the engine's
//! model constructor reads from it. Every key is a schema name and every
//! stored value has the schema's declared kind.

use super::schema::{self, ParamSpec, SCHEMA};
use super::value::ParamValue;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamValues {
    values: BTreeMap<&'static str, ParamValue>,
}

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_i64)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Store a value under a schema name, converting it to the declared kind.
    ///
    /// This is the raw write used by engine file readers; it ignores the
    /// `settable` flag. Lock state is enforced by `ParameterSet`, not here.
    ///
    /// # Returns
    /// * `Ok(())` if the name is known and the value fits its kind
    /// * `Err(String)` with an error message otherwise
    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<(), String> {
        let spec = schema::lookup(name).ok_or_else(|| format!("'{}' is not a known parameter", name))?;
        let value = value
            .into()
            .coerce_to(spec.kind)
            .map_err(|reason| format!("'{}': {}", name, reason))?;
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Schema entries that have no value yet
    pub fn missing(&self) -> Vec<&'static str> {
        SCHEMA
            .iter()
            .filter(|spec| !self.values.contains_key(spec.name))
            .map(|spec| spec.name)
            .collect()
    }

    /// Name/value pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static ParamSpec, &ParamValue)> + '_ {
        SCHEMA
            .iter()
            .filter_map(move |spec| self.values.get(spec.name).map(|value| (spec, value)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

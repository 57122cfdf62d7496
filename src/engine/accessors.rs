//! Registry of live engine parameter accessors.
//!
//! The binding layer registers one typed getter, and optionally a setter,
//! per parameter name. Lookups happen against this table; a name without a
//! registered getter is reported as unknown to the engine.

use crate::params::{ParamKind, ParamValue};
use std::collections::BTreeMap;
use std::fmt;

/// Typed read of a live parameter
pub enum Getter<M> {
    Int(fn(&M) -> i64),
    Float(fn(&M) -> f64),
}

/// Typed write of a live parameter; returns `false` when the engine refuses
pub enum Setter<M> {
    Int(fn(&mut M, i64) -> bool),
    Float(fn(&mut M, f64) -> bool),
}

pub struct ParamAccessor<M> {
    pub getter: Getter<M>,
    pub setter: Option<Setter<M>>,
}

impl<M> Getter<M> {
    /// Read the parameter from a model.
    ///
    /// The engine reports "absent" or "off" as a negative number; that is
    /// translated to `None` here so callers never see the sentinel.
    pub fn read(&self, model: &M) -> Option<ParamValue> {
        match self {
            Getter::Int(get) => {
                let value = get(model);
                (value >= 0).then_some(ParamValue::Int(value))
            }
            Getter::Float(get) => {
                let value = get(model);
                (value >= 0.0).then_some(ParamValue::Float(value))
            }
        }
    }
}

impl<M> Setter<M> {
    pub fn kind(&self) -> ParamKind {
        match self {
            Setter::Int(_) => ParamKind::Int,
            Setter::Float(_) => ParamKind::Float,
        }
    }

    /// Convert `value` to the setter's kind and apply it.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the engine accepted the update
    /// * `Err(String)` - The value cannot be represented in the setter's kind
    pub fn write(&self, model: &mut M, value: ParamValue) -> Result<bool, String> {
        match (self, value.coerce_to(self.kind())?) {
            (Setter::Int(set), ParamValue::Int(v)) => Ok(set(model, v)),
            (Setter::Float(set), ParamValue::Float(v)) => Ok(set(model, v)),
            (setter, other) => Err(format!(
                "cannot pass {} value to {} setter",
                other.kind().as_str(),
                setter.kind().as_str()
            )),
        }
    }
}

/// Name-indexed accessor table supplied by an engine binding
pub struct ParamAccessors<M> {
    entries: BTreeMap<&'static str, ParamAccessor<M>>,
}

impl<M> ParamAccessors<M> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn int(mut self, name: &'static str, get: fn(&M) -> i64, set: fn(&mut M, i64) -> bool) -> Self {
        self.entries.insert(
            name,
            ParamAccessor {
                getter: Getter::Int(get),
                setter: Some(Setter::Int(set)),
            },
        );
        self
    }

    pub fn float(mut self, name: &'static str, get: fn(&M) -> f64, set: fn(&mut M, f64) -> bool) -> Self {
        self.entries.insert(
            name,
            ParamAccessor {
                getter: Getter::Float(get),
                setter: Some(Setter::Float(set)),
            },
        );
        self
    }

    pub fn int_read_only(mut self, name: &'static str, get: fn(&M) -> i64) -> Self {
        self.entries.insert(
            name,
            ParamAccessor {
                getter: Getter::Int(get),
                setter: None,
            },
        );
        self
    }

    pub fn float_read_only(mut self, name: &'static str, get: fn(&M) -> f64) -> Self {
        self.entries.insert(
            name,
            ParamAccessor {
                getter: Getter::Float(get),
                setter: None,
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamAccessor<M>> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for ParamAccessors<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for ParamAccessors<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

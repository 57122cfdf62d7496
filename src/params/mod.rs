//! Named, typed simulation parameters.
//!
//! - `schema`: static table of parameter names, kinds and access flags
//! - `value`: parameter values and kind coercion
//! - `container`: name-indexed value container shared with the engine
//! - `validation`: cross-field checks run at lock time
//! - `store`: the load / set / lock lifecycle

pub mod container;
pub mod schema;
pub mod store;
pub mod validation;
pub mod value;

pub use container::ParamValues;
pub use schema::{is_runtime_mutable, lookup, ParamSpec, RUNTIME_MUTABLE, SCHEMA};
pub use store::{LoadRequest, LockState, LockedParameters, ParameterSet};
pub use validation::validate_parameters;
pub use value::{ParamKind, ParamValue};

//! Simulation engine binding surface.
//!
//! The epidemic model itself is an external native component. This module
//! describes the fixed set of entry points the run supervisor consumes; a
//! binding layer implements [`Engine`] on top of the native library.
//!
//! ## Resource pairing
//!
//! `create_model` acquires a model handle from a parameter container.
//! `destroy_model` and `destroy_params` release them and are each called
//! exactly once per controller, model first.

pub mod accessors;

pub use accessors::{Getter, ParamAccessor, ParamAccessors, Setter};

use crate::params::ParamValues;
use serde::{Deserialize, Serialize};

/// Failure reported by the engine binding layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Population counter categories queried after each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Presymptomatic,
    Asymptomatic,
    Symptomatic,
    Hospitalised,
    Critical,
    Death,
    Recovered,
    Quarantined,
    /// Confirmed cases
    Case,
    TestResult,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Presymptomatic => "presymptomatic",
            Category::Asymptomatic => "asymptomatic",
            Category::Symptomatic => "symptomatic",
            Category::Hospitalised => "hospitalised",
            Category::Critical => "critical",
            Category::Death => "death",
            Category::Recovered => "recovered",
            Category::Quarantined => "quarantined",
            Category::Case => "case",
            Category::TestResult => "test_result",
        }
    }
}

/// Entry points of the native epidemic engine.
///
/// All calls are blocking. `one_time_step` in particular may simulate a full
/// day of population interaction and offers no cancellation.
pub trait Engine {
    /// Opaque handle for one in-progress run
    type Model;

    /// Populate `params` from the parameter file row named by its
    /// `input_param_file` and `param_line_number` entries
    fn read_param_file(&mut self, params: &mut ParamValues) -> Result<(), EngineError>;

    /// Populate household reference data from `input_household_file`
    fn read_household_demographics_file(&mut self, params: &mut ParamValues) -> Result<(), EngineError>;

    /// Engine-side consistency check of a complete parameter set
    fn check_params(&self, params: &ParamValues) -> Result<(), EngineError>;

    fn create_model(&mut self, params: &ParamValues) -> Result<Self::Model, EngineError>;

    /// Advance the model by one day
    fn one_time_step(&mut self, model: &mut Self::Model);

    /// Day the model has reached
    fn model_time(&self, model: &Self::Model) -> u32;

    /// Cumulative number of individuals ever in `category`
    fn util_n_total(&self, model: &Self::Model, category: Category) -> i64;

    /// Number of individuals currently in `category`
    fn util_n_current(&self, model: &Self::Model, category: Category) -> i64;

    /// Number of `category` events recorded for `day`
    fn util_n_daily(&self, model: &Self::Model, category: Category, day: u32) -> i64;

    fn write_output_files(&mut self, model: &Self::Model, params: &ParamValues) -> Result<(), EngineError>;

    fn destroy_model(&mut self, model: Self::Model);

    fn destroy_params(&mut self, params: ParamValues);

    /// Live getter/setter pairs the engine exposes for a running model
    fn param_accessors(&self) -> ParamAccessors<Self::Model>;
}

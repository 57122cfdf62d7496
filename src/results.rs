//! Per-step result extraction.
//!
//! Translates engine counters into the fixed metrics record reported after
//! every step. The field names are a reporting contract with downstream
//! consumers and are serialized verbatim, including `n_sysmptoms`.

use crate::engine::{Category, Engine};
use crate::params::ParamValues;
use serde::{Deserialize, Serialize};

/// Simulation state as of the most recently completed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub time: u32,
    /// Echoed from the locked configuration, not the engine
    pub lockdown: i64,
    pub test_on_symptoms: i64,
    pub app_turned_on: i64,
    /// Individuals ever pre-symptomatic or asymptomatic
    pub total_infected: i64,
    pub total_case: i64,
    pub n_presymptom: i64,
    pub n_asymptom: i64,
    pub n_quarantine: i64,
    /// Tests administered on the day just completed
    pub n_tests: i64,
    #[serde(rename = "n_sysmptoms")]
    pub n_symptoms: i64,
    pub n_hospital: i64,
    pub n_critical: i64,
    pub n_death: i64,
    pub n_recovered: i64,
}

/// Build a snapshot from the engine's counters.
///
/// Each counter is queried independently, and so is the model's clock.
/// Daily test results are read from the engine's day index `time + 1`,
/// which is where the engine files the results of the step that produced
/// `time`.
pub fn extract<E: Engine>(engine: &E, model: &E::Model, params: &ParamValues) -> ResultSnapshot {
    let time = engine.model_time(model);
    let current = |category| engine.util_n_current(model, category);

    ResultSnapshot {
        time,
        lockdown: params.int("lockdown_on").unwrap_or_default(),
        test_on_symptoms: params.int("test_on_symptoms").unwrap_or_default(),
        app_turned_on: params.int("app_turned_on").unwrap_or_default(),
        total_infected: engine.util_n_total(model, Category::Presymptomatic)
            + engine.util_n_total(model, Category::Asymptomatic),
        total_case: engine.util_n_total(model, Category::Case),
        n_presymptom: current(Category::Presymptomatic),
        n_asymptom: current(Category::Asymptomatic),
        n_quarantine: current(Category::Quarantined),
        n_tests: engine.util_n_daily(model, Category::TestResult, time + 1),
        n_symptoms: current(Category::Symptomatic),
        n_hospital: current(Category::Hospitalised),
        n_critical: current(Category::Critical),
        n_death: current(Category::Death),
        n_recovered: current(Category::Recovered),
    }
}

//! Run plan: one supervised simulation run described in YAML.
//!
//! ```yaml
//! load:
//!   input_param_file: "params/baseline.csv"
//!   param_line_number: 1
//!   output_file_dir: "output"
//!   input_household_file: "params/households.csv"
//! overrides:
//!   n_total: 100000
//!   lockdown_time_on: 1000
//! days: 60
//! interventions:
//!   - day: 20
//!     param: lockdown_on
//!     value: 1
//!   - day: 35
//!     param: app_users_fraction
//!     value: 0.6
//! write_output: true
//! ```

use crate::params::{is_runtime_mutable, lookup, LoadRequest, ParamValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPlan {
    pub load: LoadRequest,
    /// Applied with `set_param` before the parameter set is locked
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, ParamValue>,
    /// Number of steps to run
    pub days: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interventions: Vec<Intervention>,
    /// Ask the engine to write its output files after the last step
    #[serde(default)]
    pub write_output: bool,
}

/// Runtime parameter update applied before the step that starts on `day`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub day: u32,
    pub param: String,
    pub value: ParamValue,
}

/// Run plan validation errors
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Invalid run configuration: {0}")]
    InvalidRun(String),
    #[error("Invalid parameter override: {0}")]
    InvalidOverride(String),
    #[error("Invalid intervention: {0}")]
    InvalidIntervention(String),
}

impl RunPlan {
    /// Validate the plan against the parameter schema and runtime whitelist
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.days == 0 {
            return Err(PlanError::InvalidRun("days must be at least 1".to_string()));
        }

        for (name, value) in &self.overrides {
            let spec = lookup(name)
                .ok_or_else(|| PlanError::InvalidOverride(format!("unknown parameter '{}'", name)))?;
            if !spec.settable {
                return Err(PlanError::InvalidOverride(format!("'{}' is read-only", name)));
            }
            value
                .clone()
                .coerce_to(spec.kind)
                .map_err(|reason| PlanError::InvalidOverride(format!("'{}': {}", name, reason)))?;
        }

        for intervention in &self.interventions {
            if !is_runtime_mutable(&intervention.param) {
                return Err(PlanError::InvalidIntervention(format!(
                    "'{}' cannot be changed while the simulation is running",
                    intervention.param
                )));
            }
            if intervention.day >= self.days {
                return Err(PlanError::InvalidIntervention(format!(
                    "'{}' scheduled on day {} but the run only has {} day(s)",
                    intervention.param, intervention.day, self.days
                )));
            }
            if let Some(spec) = lookup(&intervention.param) {
                intervention
                    .value
                    .clone()
                    .coerce_to(spec.kind)
                    .map_err(|reason| {
                        PlanError::InvalidIntervention(format!("'{}': {}", intervention.param, reason))
                    })?;
            }
        }

        Ok(())
    }

    /// Interventions scheduled for `day`, in plan order
    pub fn interventions_on(&self, day: u32) -> impl Iterator<Item = &Intervention> + '_ {
        self.interventions.iter().filter(move |i| i.day == day)
    }

    /// Number of interventions per scheduled day
    pub fn intervention_schedule(&self) -> BTreeMap<u32, usize> {
        let mut schedule = BTreeMap::new();
        for intervention in &self.interventions {
            *schedule.entry(intervention.day).or_insert(0) += 1;
        }
        schedule
    }
}

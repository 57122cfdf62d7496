//! Parameter store: load, edit, validate and lock a parameter set.
//!
//! A `ParameterSet` starts `Unlocked`. Locking runs every consistency check
//! and hands out a single [`LockedParameters`] token, which is the only way
//! to construct a simulation controller. After that the set stays readable
//! but can never be written again.

use super::container::ParamValues;
use super::schema;
use super::validation::validate_parameters;
use super::value::ParamValue;
use crate::engine::Engine;
use crate::error::{Result, SimError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Inputs naming the parameter row and household data for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Indexed parameter file (format owned by the engine)
    pub input_param_file: PathBuf,
    /// Row of the parameter file to read
    pub param_line_number: u32,
    /// Directory the engine writes its output files to
    pub output_file_dir: PathBuf,
    /// Household demographics file (format owned by the engine)
    pub input_household_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

#[derive(Debug)]
pub struct ParameterSet {
    values: ParamValues,
    state: LockState,
}

/// Validated, immutable configuration ready to bind to one controller.
///
/// Not `Clone`: a locked set is consumed by exactly one controller.
#[derive(Debug)]
pub struct LockedParameters {
    values: ParamValues,
}

impl LockedParameters {
    pub fn values(&self) -> &ParamValues {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub(crate) fn into_values(self) -> ParamValues {
        self.values
    }
}

impl ParameterSet {
    /// Read the requested parameter row and household data through the engine
    ///
    /// # Arguments
    /// * `engine` - Engine binding that owns the file formats
    /// * `request` - Which files and row to read
    ///
    /// # Returns
    /// * `Ok(ParameterSet)` in the `Unlocked` state
    /// * `Err(SimError::Configuration)` if a file is missing, malformed,
    ///   the row does not exist, or the engine left a schema field unset
    pub fn load<E: Engine>(engine: &mut E, request: &LoadRequest) -> Result<Self> {
        info!(
            "Loading parameters from {:?} (line {}), households from {:?}",
            request.input_param_file, request.param_line_number, request.input_household_file
        );

        for (label, path) in [
            ("Parameter file", &request.input_param_file),
            ("Household demographics file", &request.input_household_file),
        ] {
            if !path.is_file() {
                return Err(SimError::Configuration(format!("{} not found: {}", label, path.display())));
            }
        }

        let mut values = ParamValues::new();
        let identity = [
            ("input_param_file", ParamValue::from(request.input_param_file.display().to_string())),
            ("param_line_number", ParamValue::Int(request.param_line_number as i64)),
            ("output_file_dir", ParamValue::from(request.output_file_dir.display().to_string())),
            ("input_household_file", ParamValue::from(request.input_household_file.display().to_string())),
        ];
        for (name, value) in identity {
            values.insert(name, value).map_err(SimError::Configuration)?;
        }

        engine
            .read_param_file(&mut values)
            .map_err(|e| SimError::configuration("Failed to read parameter file", e))?;
        engine
            .read_household_demographics_file(&mut values)
            .map_err(|e| SimError::configuration("Failed to read household demographics file", e))?;

        let missing = values.missing();
        if !missing.is_empty() {
            return Err(SimError::Configuration(format!(
                "Parameter file did not provide: {}",
                missing.join(", ")
            )));
        }

        debug!("Loaded {} parameters", values.len());

        Ok(Self {
            values,
            state: LockState::Unlocked,
        })
    }

    pub fn get_param(&self, name: &str) -> Result<&ParamValue> {
        self.values.get(name).ok_or_else(|| SimError::UnknownParameter {
            name: name.to_string(),
        })
    }

    /// Set a parameter, converting the value to the parameter's declared kind.
    ///
    /// A failed call leaves the set unchanged.
    pub fn set_param(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<()> {
        if self.state == LockState::Locked {
            return Err(SimError::LockedState(
                "parameter set has been exported to a model; use runtime updates on the controller".to_string(),
            ));
        }

        let spec = schema::lookup(name).ok_or_else(|| SimError::UnknownParameter {
            name: name.to_string(),
        })?;
        if !spec.settable {
            return Err(SimError::ReadOnlyParameter {
                name: name.to_string(),
            });
        }

        let value = value
            .into()
            .coerce_to(spec.kind)
            .map_err(|reason| SimError::InvalidParameterValue {
                name: name.to_string(),
                reason,
            })?;

        debug!("Setting parameter {} = {}", name, value);
        self.values
            .insert(spec.name, value)
            .map_err(SimError::Configuration)
    }

    /// Apply a batch of overrides in name order, stopping at the first failure
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, ParamValue>) -> Result<()> {
        for (name, value) in overrides {
            self.set_param(name, value.clone())?;
        }
        if !overrides.is_empty() {
            info!("Applied {} parameter override(s)", overrides.len());
        }
        Ok(())
    }

    /// Validate the set and lock it.
    ///
    /// Runs the cross-field checks, then the engine's own `check_params`.
    /// On success the set becomes `Locked` for good and the returned token
    /// can be bound to one controller.
    ///
    /// # Returns
    /// * `Ok(LockedParameters)` on the first successful call
    /// * `Err(SimError::Validation)` if a check fails; the set stays unlocked
    /// * `Err(SimError::LockedState)` if the set was already locked
    pub fn lock<E: Engine>(&mut self, engine: &E) -> Result<LockedParameters> {
        if self.state == LockState::Locked {
            return Err(SimError::LockedState(
                "parameter set was already locked and handed to a model".to_string(),
            ));
        }

        validate_parameters(&self.values).map_err(SimError::Validation)?;
        engine
            .check_params(&self.values)
            .map_err(|e| SimError::Validation(e.to_string()))?;

        self.state = LockState::Locked;
        info!("Parameters locked for model construction, future updates to parameters not possible");

        Ok(LockedParameters {
            values: self.values.clone(),
        })
    }

    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn values(&self) -> &ParamValues {
        &self.values
    }
}

//! Simulation controller.
//!
//! Owns one engine model bound to one locked parameter set, and is the only
//! path through which that model is read or written.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --construct--> Created --step--> Running --step--> Running
//!       |                         |                  |
//!       +-------------------------+------------------+--destroy--> Destroyed
//! ```
//!
//! `destroy` releases the model and then the parameters, exactly once. It
//! also runs on drop, so every exit path tears down in the same order.

use crate::engine::{Engine, ParamAccessors};
use crate::error::{Result, SimError};
use crate::params::{is_runtime_mutable, LockedParameters, ParamValue, ParamValues};
use crate::results::{self, ResultSnapshot};
use log::{debug, info, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Created,
    Running,
    Destroyed,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Uninitialized => "uninitialized",
            ControllerState::Created => "created",
            ControllerState::Running => "running",
            ControllerState::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct SimulationController<E: Engine> {
    engine: E,
    accessors: ParamAccessors<E::Model>,
    model: Option<E::Model>,
    params: Option<ParamValues>,
    state: ControllerState,
    time: u32,
}

impl<E: Engine> SimulationController<E> {
    /// Create a model from a locked parameter set.
    ///
    /// If the engine rejects the configuration, the parameters are released
    /// before the error is returned, so a failed construction leaves nothing
    /// behind to clean up.
    pub fn construct(mut engine: E, params: LockedParameters) -> Result<Self> {
        let accessors = engine.param_accessors();
        let values = params.into_values();

        match engine.create_model(&values) {
            Ok(model) => {
                info!("Successfully created model");
                Ok(Self {
                    engine,
                    accessors,
                    model: Some(model),
                    params: Some(values),
                    state: ControllerState::Created,
                    time: 0,
                })
            }
            Err(err) => {
                let mut partial = Self {
                    engine,
                    accessors,
                    model: None,
                    params: Some(values),
                    state: ControllerState::Uninitialized,
                    time: 0,
                };
                partial.destroy();
                Err(SimError::EngineInit(err.to_string()))
            }
        }
    }

    fn live_model(&self, operation: &str) -> Result<&E::Model> {
        self.model.as_ref().ok_or_else(|| self.state_error(operation))
    }

    fn state_error(&self, operation: &str) -> SimError {
        SimError::ControllerState {
            state: self.state.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Read a live engine-side parameter.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Current engine value
    /// * `Ok(None)` - The engine reports the parameter as absent or off
    /// * `Err(SimError::UnknownEngineParameter)` - No accessor for `name`
    pub fn get_param(&self, name: &str) -> Result<Option<ParamValue>> {
        let model = self.live_model("read engine parameters")?;
        let accessor = self
            .accessors
            .get(name)
            .ok_or_else(|| SimError::UnknownEngineParameter {
                name: name.to_string(),
            })?;
        Ok(accessor.getter.read(model))
    }

    /// Change a whitelisted policy parameter on the running model.
    ///
    /// Names outside the runtime whitelist are refused before the engine is
    /// touched, whatever the controller state. The locked parameter set is
    /// not modified.
    pub fn update_running_param(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<()> {
        if !is_runtime_mutable(name) {
            return Err(SimError::ForbiddenRuntimeUpdate {
                name: name.to_string(),
            });
        }

        let value = value.into();
        let rejected = |value: &ParamValue| SimError::RuntimeUpdateRejected {
            name: name.to_string(),
            value: value.to_string(),
        };

        let Some(model) = self.model.as_mut() else {
            return Err(self.state_error("update running parameters"));
        };

        let Some(setter) = self.accessors.get(name).and_then(|a| a.setter.as_ref()) else {
            warn!("Engine exposes no setter for {}", name);
            return Err(rejected(&value));
        };

        let accepted = setter
            .write(model, value.clone())
            .map_err(|reason| SimError::InvalidParameterValue {
                name: name.to_string(),
                reason,
            })?;

        if accepted {
            info!("Updated running parameter {} = {}", name, value);
            Ok(())
        } else {
            warn!("Engine rejected update of {} to {}", name, value);
            Err(rejected(&value))
        }
    }

    /// Advance the model by one day.
    ///
    /// Blocks until the engine returns; there are no partial steps.
    pub fn step(&mut self) -> Result<()> {
        let Some(model) = self.model.as_mut() else {
            return Err(self.state_error("step"));
        };

        self.engine.one_time_step(model);
        self.time += 1;
        self.state = ControllerState::Running;
        debug!("Completed step, time is now {}", self.time);
        Ok(())
    }

    /// Metrics for the most recently completed step; does not advance time
    pub fn snapshot(&self) -> Result<ResultSnapshot> {
        let model = self.live_model("take a snapshot")?;
        let params = self.params.as_ref().ok_or_else(|| self.state_error("take a snapshot"))?;
        Ok(results::extract(&self.engine, model, params))
    }

    /// Ask the engine to persist its accumulated results
    pub fn write_output_files(&mut self) -> Result<()> {
        let (Some(model), Some(params)) = (self.model.as_ref(), self.params.as_ref()) else {
            return Err(self.state_error("write output files"));
        };

        self.engine
            .write_output_files(model, params)
            .map_err(|e| SimError::Output(e.to_string()))?;
        info!("Wrote engine output files");
        Ok(())
    }

    /// Release the model, then the parameters.
    ///
    /// Calling this on a destroyed controller does nothing.
    pub fn destroy(&mut self) {
        if self.state == ControllerState::Destroyed {
            return;
        }

        if let Some(model) = self.model.take() {
            self.engine.destroy_model(model);
        }
        if let Some(params) = self.params.take() {
            self.engine.destroy_params(params);
        }

        debug!("Controller destroyed after {} step(s)", self.time);
        self.state = ControllerState::Destroyed;
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of completed steps
    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The bound configuration, while the controller is alive
    pub fn parameters(&self) -> Option<&ParamValues> {
        self.params.as_ref()
    }
}

impl<E: Engine> Drop for SimulationController<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}

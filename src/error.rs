//! Error taxonomy for the run supervisor.
//!
//! Every failure is reported synchronously to the immediate caller. Nothing
//! in this crate retries or recovers silently; deciding whether to abort a
//! run is the caller's job.

use crate::engine::EngineError;

/// Errors surfaced by the parameter store, the controller and the orchestrator
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Missing or malformed parameter/household input, or a bad line index
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cross-field invariant violated at lock time
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown parameter '{name}'")]
    UnknownParameter { name: String },

    #[error("Engine has no accessor for parameter '{name}'")]
    UnknownEngineParameter { name: String },

    /// Parameter set has been exported to a controller
    #[error("Parameter set is locked: {0}")]
    LockedState(String),

    #[error("Parameter '{name}' cannot be updated while the simulation is running")]
    ForbiddenRuntimeUpdate { name: String },

    #[error("Engine rejected runtime update of '{name}' to {value}")]
    RuntimeUpdateRejected { name: String, value: String },

    #[error("Engine failed to create model: {0}")]
    EngineInit(String),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameterValue { name: String, reason: String },

    #[error("Parameter '{name}' is read-only")]
    ReadOnlyParameter { name: String },

    /// Engine failed to persist its output files
    #[error("Failed to write output files: {0}")]
    Output(String),

    #[error(transparent)]
    Plan(#[from] crate::plan::PlanError),

    /// Operation needs a live engine handle
    #[error("Controller is {state}; cannot {operation}")]
    ControllerState { state: String, operation: String },
}

impl SimError {
    pub(crate) fn configuration(context: &str, err: EngineError) -> Self {
        SimError::Configuration(format!("{}: {}", context, err))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

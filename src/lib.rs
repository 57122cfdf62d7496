//! # Epistep - Run supervisor for agent-based epidemic simulations
//!
//! This library supervises a single run of a stochastic, discrete-time,
//! agent-based epidemic model. The model itself is an external native
//! engine; this crate owns everything around it.
//!
//! ## Overview
//!
//! - **Parameter lifecycle**: load a parameter row and household data through
//!   the engine, edit it, validate it and lock it for good
//! - **Controlled stepping**: advance the model one day at a time
//! - **Safe runtime updates**: change a fixed whitelist of policy parameters
//!   (lockdown, testing, tracing, quarantine, app adoption) mid-run
//! - **Per-day metrics**: a fixed snapshot of population counters after each step
//! - **Deterministic teardown**: model released before parameters, exactly once
//!
//! ## Architecture
//!
//! - `params`: parameter schema, values, validation and the lock lifecycle
//! - `engine`: the engine binding trait and live accessor registry
//! - `controller`: owns one model and mediates every access to it
//! - `results`: translates engine counters into a `ResultSnapshot`
//! - `plan` / `plan_loader`: YAML run plans
//! - `orchestrator`: drives a controller through a plan
//! - `error`: the error taxonomy
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use epistep::{ParameterSet, SimulationController, LoadRequest};
//!
//! let mut engine = MyEngineBinding::new();
//! let mut params = ParameterSet::load(&mut engine, &request)?;
//! params.set_param("lockdown_on", 1)?;
//! let locked = params.lock(&engine)?;
//!
//! let mut controller = SimulationController::construct(engine, locked)?;
//! for _ in 0..60 {
//!     controller.step()?;
//!     let snapshot = controller.snapshot()?;
//!     println!("day {}: {} cases", snapshot.time, snapshot.total_case);
//! }
//! controller.update_running_param("app_users_fraction", 0.5)?;
//! controller.write_output_files()?;
//! ```
//!
//! ## Error Handling
//!
//! Library operations return `epistep::Result<T>` with a `SimError`. Every
//! failure reaches the immediate caller; nothing is retried. File-level
//! helpers (`plan_loader`, `RunReport::write_json`) and the binary use
//! `color_eyre` for context-rich reports.

pub mod controller;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod params;
pub mod plan;
pub mod plan_loader;
pub mod results;

#[cfg(test)]
mod testing;

pub use controller::{ControllerState, SimulationController};
pub use engine::{Category, Engine, EngineError, ParamAccessors};
pub use error::{Result, SimError};
pub use orchestrator::{prepare, run_plan, RunReport};
pub use params::{LoadRequest, LockedParameters, ParamValue, ParameterSet};
pub use plan::{Intervention, PlanError, RunPlan};
pub use results::ResultSnapshot;

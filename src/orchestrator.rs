//! Run orchestrator.
//!
//! Coordinates one supervised run from a plan: load and lock the
//! parameters, bind them to a controller, then step day by day applying the
//! scheduled interventions and collecting a snapshot after every step.

use crate::controller::SimulationController;
use crate::engine::Engine;
use crate::error::Result;
use crate::params::ParameterSet;
use crate::plan::RunPlan;
use crate::results::ResultSnapshot;
use color_eyre::eyre::WrapErr;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshots collected over one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub snapshots: Vec<ResultSnapshot>,
    pub interventions_applied: usize,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> color_eyre::Result<()> {
        let json = self.to_json().wrap_err("Failed to serialize run report")?;
        std::fs::write(path, json)
            .wrap_err_with(|| format!("Failed to write run report to '{}'", path.display()))?;
        info!("Wrote run report: {:?}", path);
        Ok(())
    }

    pub fn last(&self) -> Option<&ResultSnapshot> {
        self.snapshots.last()
    }
}

/// Load, override, lock and bind the plan's parameters to a new controller
pub fn prepare<E: Engine>(mut engine: E, plan: &RunPlan) -> Result<SimulationController<E>> {
    plan.validate()?;

    let mut params = ParameterSet::load(&mut engine, &plan.load)?;
    params.apply_overrides(&plan.overrides)?;
    let locked = params.lock(&engine)?;

    SimulationController::construct(engine, locked)
}

/// Drive a controller through every day of the plan.
///
/// Interventions for day `d` are applied before the step that moves time
/// from `d` to `d + 1`. The first error stops the run and is returned as-is.
pub fn run_plan<E: Engine>(controller: &mut SimulationController<E>, plan: &RunPlan) -> Result<RunReport> {
    plan.validate()?;

    let mut report = RunReport::default();
    let start = controller.time();
    info!("Running {} day(s) starting at time {}", plan.days, start);

    for day in 0..plan.days {
        for intervention in plan.interventions_on(day) {
            controller.update_running_param(&intervention.param, intervention.value.clone())?;
            report.interventions_applied += 1;
        }

        controller.step()?;
        let snapshot = controller.snapshot()?;
        debug!(
            "Day {}: total_infected={} total_case={} n_death={}",
            snapshot.time, snapshot.total_infected, snapshot.total_case, snapshot.n_death
        );
        report.snapshots.push(snapshot);
    }

    if plan.write_output {
        controller.write_output_files()?;
    }

    info!(
        "Run finished at time {} ({} intervention(s) applied)",
        controller.time(),
        report.interventions_applied
    );
    Ok(report)
}

use crate::plan::RunPlan;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse a run plan from a YAML file
pub fn load_plan(plan_path: &Path) -> Result<RunPlan> {
    info!("Loading run plan from: {:?}", plan_path);

    let file = File::open(plan_path)
        .wrap_err_with(|| format!("Failed to open run plan '{}'", plan_path.display()))?;

    let plan: RunPlan = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse run plan '{}'", plan_path.display()))?;

    plan.validate()?;

    if plan.interventions.is_empty() {
        info!("Run plan has no scheduled interventions");
    }

    Ok(plan)
}

/// Check that the files named in a plan's load section exist
///
/// Paths are resolved relative to the current directory, as the engine
/// will resolve them.
pub fn check_plan_inputs(plan: &RunPlan) -> Result<()> {
    for path in [&plan.load.input_param_file, &plan.load.input_household_file] {
        if !path.is_file() {
            color_eyre::eyre::bail!("Input file not found: {}", path.display());
        }
    }

    if !plan.load.output_file_dir.exists() {
        warn!(
            "Output directory {:?} does not exist yet; the engine must create it",
            plan.load.output_file_dir
        );
    }

    Ok(())
}

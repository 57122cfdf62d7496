use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use epistep::params::{lookup, RUNTIME_MUTABLE};
use epistep::plan_loader;
use log::info;
use std::path::PathBuf;

/// Check a run plan for an agent-based epidemic simulation
///
/// The binary has no engine linked in. It validates plans so they can be
/// handed to a host program that links an engine binding.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the run plan YAML file
    #[arg(short, long)]
    plan: PathBuf,

    /// Also check that the parameter and household files exist
    #[arg(long)]
    check_inputs: bool,

    /// List the parameters that may be changed while a run is in progress
    #[arg(long)]
    list_runtime_params: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if args.list_runtime_params {
        for name in RUNTIME_MUTABLE {
            let kind = lookup(name).map(|spec| spec.kind.as_str()).unwrap_or("unknown");
            println!("{} ({})", name, kind);
        }
    }

    let plan = plan_loader::load_plan(&args.plan)?;

    if args.check_inputs {
        plan_loader::check_plan_inputs(&plan)?;
        info!("Input files present");
    }

    info!("Parameter file: {:?} (line {})", plan.load.input_param_file, plan.load.param_line_number);
    info!("Household file: {:?}", plan.load.input_household_file);
    info!("Days: {}", plan.days);
    info!("Overrides: {}", plan.overrides.len());
    for (name, value) in &plan.overrides {
        info!("  {} = {}", name, value);
    }
    for (day, count) in plan.intervention_schedule() {
        info!("Day {}: {} intervention(s)", day, count);
    }

    info!("Run plan is valid");
    Ok(())
}

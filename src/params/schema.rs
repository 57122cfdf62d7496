//! Static parameter schema.
//!
//! Every scalar field of the engine's parameter container is listed here
//! with its declared kind and two access flags. All name-based access in
//! the parameter store and the controller resolves against this table.
//! Array-valued engine fields (age-stratified fractions, household sizes,
//! ward layouts) are not addressable by name.

use super::value::ParamKind;

/// Schema entry for one named parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// May be written with `set_param` before the set is locked
    pub settable: bool,
    /// May be changed through the controller while the model is running
    pub runtime_mutable: bool,
}

impl ParamSpec {
    const fn new(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            settable: true,
            runtime_mutable: false,
        }
    }

    const fn int(name: &'static str) -> Self {
        Self::new(name, ParamKind::Int)
    }

    const fn float(name: &'static str) -> Self {
        Self::new(name, ParamKind::Float)
    }

    const fn text(name: &'static str) -> Self {
        Self::new(name, ParamKind::Text)
    }

    const fn runtime(self) -> Self {
        Self {
            runtime_mutable: true,
            ..self
        }
    }

    const fn read_only(self) -> Self {
        Self {
            settable: false,
            ..self
        }
    }
}

/// Policy parameters that are safe to change mid-run
pub const RUNTIME_MUTABLE: [&str; 17] = [
    "test_on_symptoms",
    "test_on_traced",
    "quarantine_on_traced",
    "traceable_interaction_fraction",
    "tracing_network_depth",
    "allow_clinical_diagnosis",
    "quarantine_household_on_positive",
    "quarantine_household_on_symptoms",
    "quarantine_household_on_traced",
    "quarantine_household_contacts_on_positive",
    "quarantine_days",
    "test_order_wait",
    "test_result_wait",
    "self_quarantine_fraction",
    "lockdown_on",
    "app_turned_on",
    "app_users_fraction",
];

pub const SCHEMA: &[ParamSpec] = &[
    // Load identity
    ParamSpec::text("input_param_file").read_only(),
    ParamSpec::int("param_line_number").read_only(),
    ParamSpec::text("hospital_input_param_file").read_only(),
    ParamSpec::int("hospital_param_line_number").read_only(),
    ParamSpec::text("input_household_file").read_only(),
    ParamSpec::text("output_file_dir").read_only(),
    ParamSpec::int("N_REFERENCE_HOUSEHOLDS").read_only(),
    // Run setup
    ParamSpec::int("rng_seed"),
    ParamSpec::int("param_id"),
    ParamSpec::int("n_total"),
    ParamSpec::int("days_of_interactions"),
    ParamSpec::int("end_time"),
    ParamSpec::int("n_seed_infection"),
    ParamSpec::int("sys_write_individual"),
    // Interaction networks
    ParamSpec::int("random_interaction_distribution"),
    ParamSpec::float("daily_fraction_work"),
    ParamSpec::float("child_network_adults"),
    ParamSpec::float("elderly_network_adults"),
    ParamSpec::int("quarantined_daily_interactions"),
    ParamSpec::int("hospitalised_daily_interactions"),
    // Disease course
    ParamSpec::float("mean_infectious_period"),
    ParamSpec::float("sd_infectious_period"),
    ParamSpec::float("infectious_rate"),
    ParamSpec::float("mean_time_to_symptoms"),
    ParamSpec::float("sd_time_to_symptoms"),
    ParamSpec::float("mean_time_to_hospital"),
    ParamSpec::float("mean_time_to_critical"),
    ParamSpec::float("mean_time_to_recover"),
    ParamSpec::float("sd_time_to_recover"),
    ParamSpec::float("mean_time_to_death"),
    ParamSpec::float("sd_time_to_death"),
    ParamSpec::float("asymptomatic_infectious_factor"),
    ParamSpec::float("mild_infectious_factor"),
    ParamSpec::float("mean_asymptomatic_to_recovery"),
    ParamSpec::float("sd_asymptomatic_to_recovery"),
    ParamSpec::float("seasonal_flu_rate"),
    // Quarantine
    ParamSpec::int("quarantine_days").runtime(),
    ParamSpec::float("self_quarantine_fraction").runtime(),
    ParamSpec::int("quarantine_length_self"),
    ParamSpec::int("quarantine_length_traced"),
    ParamSpec::int("quarantine_length_positive"),
    ParamSpec::float("quarantine_dropout_self"),
    ParamSpec::float("quarantine_dropout_traced"),
    ParamSpec::float("quarantine_dropout_positive"),
    ParamSpec::int("quarantine_on_traced").runtime(),
    ParamSpec::int("quarantine_smart_release_day"),
    ParamSpec::int("quarantine_household_on_symptoms").runtime(),
    ParamSpec::int("quarantine_household_on_positive").runtime(),
    ParamSpec::int("quarantine_household_on_traced").runtime(),
    ParamSpec::int("quarantine_household_contacts_on_positive").runtime(),
    ParamSpec::int("quarantine_household_contacts_on_symptoms"),
    // Tracing
    ParamSpec::int("trace_on_symptoms"),
    ParamSpec::int("trace_on_positive"),
    ParamSpec::float("traceable_interaction_fraction").runtime(),
    ParamSpec::int("tracing_network_depth").runtime(),
    ParamSpec::int("allow_clinical_diagnosis").runtime(),
    // Testing
    ParamSpec::int("test_on_symptoms").runtime(),
    ParamSpec::int("test_on_traced").runtime(),
    ParamSpec::int("test_insensititve_period"),
    ParamSpec::int("test_result_wait").runtime(),
    ParamSpec::int("test_order_wait").runtime(),
    ParamSpec::int("testing_symptoms_time_on"),
    ParamSpec::int("testing_symptoms_time_off"),
    // App
    ParamSpec::float("app_users_fraction").runtime(),
    ParamSpec::int("app_turned_on").runtime(),
    ParamSpec::int("app_turn_on_time"),
    // Lockdown
    ParamSpec::float("lockdown_work_network_multiplier"),
    ParamSpec::float("lockdown_random_network_multiplier"),
    ParamSpec::float("lockdown_house_interaction_multiplier"),
    ParamSpec::int("lockdown_time_on"),
    ParamSpec::int("lockdown_time_off"),
    ParamSpec::int("lockdown_on").runtime(),
    ParamSpec::int("lockdown_elderly_time_on"),
    ParamSpec::int("lockdown_elderly_time_off"),
    ParamSpec::int("lockdown_elderly_on"),
    ParamSpec::int("successive_lockdown_time_on"),
    ParamSpec::int("successive_lockdown_duration"),
    ParamSpec::int("successive_lockdown_gap"),
    // Hospital
    ParamSpec::int("n_total_doctors"),
    ParamSpec::int("n_total_nurses"),
    ParamSpec::int("n_hospitals"),
    ParamSpec::int("max_hcw_daily_interactions"),
    ParamSpec::float("mean_time_hospital_transition"),
    ParamSpec::float("sd_time_hospital_transition"),
    ParamSpec::float("waiting_infectivity_modifier"),
    ParamSpec::float("general_infectivity_modifier"),
    ParamSpec::float("icu_infectivity_modifier"),
];

/// Look up the schema entry for a parameter name
pub fn lookup(name: &str) -> Option<&'static ParamSpec> {
    SCHEMA.iter().find(|spec| spec.name == name)
}

/// Check whether a parameter may be changed on a running model
pub fn is_runtime_mutable(name: &str) -> bool {
    RUNTIME_MUTABLE.contains(&name)
}

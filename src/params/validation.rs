//! Cross-field parameter validation.
//!
//! These checks run when a parameter set is locked, before the engine's own
//! `check_params`. Each function returns the first violation it finds.

use super::container::ParamValues;

/// Parameters that are probabilities or proportions
const FRACTIONS: [&str; 8] = [
    "app_users_fraction",
    "self_quarantine_fraction",
    "traceable_interaction_fraction",
    "daily_fraction_work",
    "quarantine_dropout_self",
    "quarantine_dropout_traced",
    "quarantine_dropout_positive",
    "seasonal_flu_rate",
];

/// Counts, waits and durations that cannot be negative
const NON_NEGATIVE: [&str; 8] = [
    "quarantine_days",
    "test_order_wait",
    "test_result_wait",
    "tracing_network_depth",
    "days_of_interactions",
    "end_time",
    "n_total",
    "n_seed_infection",
];

/// Run every cross-field check on a fully loaded parameter set
///
/// # Returns
/// * `Ok(())` if validation succeeds
/// * `Err(String)` with an error message if validation fails
pub fn validate_parameters(values: &ParamValues) -> Result<(), String> {
    validate_fractions(values)?;
    validate_non_negative(values)?;
    validate_interaction_window(values)?;
    validate_policy_flags(values)?;
    validate_time_windows(values)?;
    validate_seeding(values)?;
    Ok(())
}

/// Check that every fraction lies in [0, 1]
pub fn validate_fractions(values: &ParamValues) -> Result<(), String> {
    for name in FRACTIONS {
        if let Some(value) = values.float(name) {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0 and 1 (got {})", name, value));
            }
        }
    }
    Ok(())
}

pub fn validate_non_negative(values: &ParamValues) -> Result<(), String> {
    for name in NON_NEGATIVE {
        if let Some(value) = values.int(name) {
            if value < 0 {
                return Err(format!("{} cannot be negative (got {})", name, value));
            }
        }
    }
    Ok(())
}

/// Quarantine look-back and test turnaround must fit inside the stored
/// interaction history
pub fn validate_interaction_window(values: &ParamValues) -> Result<(), String> {
    let Some(days) = values.int("days_of_interactions") else {
        return Ok(());
    };

    if let Some(quarantine_days) = values.int("quarantine_days") {
        if quarantine_days > days {
            return Err(format!(
                "quarantine_days ({}) cannot be greater than days_of_interactions ({})",
                quarantine_days, days
            ));
        }
    }

    let order_wait = values.int("test_order_wait").unwrap_or(0);
    let result_wait = values.int("test_result_wait").unwrap_or(0);
    match order_wait.checked_add(result_wait) {
        Some(turnaround) if turnaround <= days => {}
        Some(turnaround) => {
            return Err(format!(
                "test_order_wait + test_result_wait ({}) cannot be greater than days_of_interactions ({})",
                turnaround, days
            ));
        }
        None => {
            return Err(format!(
                "test_order_wait ({}) + test_result_wait ({}) is out of range",
                order_wait, result_wait
            ));
        }
    }

    Ok(())
}

/// Check that dependent policy flags are only on when what they build on is on
pub fn validate_policy_flags(values: &ParamValues) -> Result<(), String> {
    let on = |name: &str| values.int(name).unwrap_or(0) > 0;

    // (flag, prerequisite)
    let rules = [
        ("test_on_traced", "quarantine_on_traced"),
        ("quarantine_household_contacts_on_positive", "quarantine_household_on_positive"),
        ("quarantine_household_contacts_on_symptoms", "quarantine_household_on_symptoms"),
    ];

    for (flag, prerequisite) in rules {
        if on(flag) && !on(prerequisite) {
            return Err(format!("{} can only be turned on if {} is on", flag, prerequisite));
        }
    }

    Ok(())
}

pub fn validate_time_windows(values: &ParamValues) -> Result<(), String> {
    let windows = [
        ("lockdown_time_on", "lockdown_time_off"),
        ("lockdown_elderly_time_on", "lockdown_elderly_time_off"),
        ("testing_symptoms_time_on", "testing_symptoms_time_off"),
    ];

    for (on, off) in windows {
        if let (Some(start), Some(end)) = (values.int(on), values.int(off)) {
            if end < start {
                return Err(format!("{} ({}) is before {} ({})", off, end, on, start));
            }
        }
    }

    Ok(())
}

pub fn validate_seeding(values: &ParamValues) -> Result<(), String> {
    if let (Some(seeds), Some(total)) = (values.int("n_seed_infection"), values.int("n_total")) {
        if seeds > total {
            return Err(format!(
                "n_seed_infection ({}) cannot exceed n_total ({})",
                seeds, total
            ));
        }
    }
    Ok(())
}

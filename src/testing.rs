//! In-memory engine used by unit tests.
//!
//! Reads a comma-separated parameter file (header row plus data rows) on top
//! of a valid baseline, counts household lines, and produces counters that
//! are simple functions of the elapsed days.

use crate::engine::{Category, Engine, EngineError, ParamAccessors};
use crate::params::{LoadRequest, ParamKind, ParamValue, ParamValues, SCHEMA};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Write a one-row parameter file and a small household file into `dir`
pub fn write_inputs(dir: &Path, row: &[(&str, &str)]) -> LoadRequest {
    let mut header = vec!["param_id"];
    let mut values = vec!["1"];
    for (name, value) in row {
        header.push(*name);
        values.push(*value);
    }

    let param_file = dir.join("params.csv");
    fs::write(&param_file, format!("{}\n{}\n", header.join(","), values.join(","))).unwrap();

    let household_file = dir.join("households.csv");
    fs::write(&household_file, "a_0_9,a_10_19\n1,0\n0,2\n2,1\n").unwrap();

    LoadRequest {
        input_param_file: param_file,
        param_line_number: 0,
        output_file_dir: dir.join("output"),
        input_household_file: household_file,
    }
}

/// Values that pass every lock-time check
pub fn baseline() -> Vec<(&'static str, ParamValue)> {
    let mut values: Vec<(&'static str, ParamValue)> = SCHEMA
        .iter()
        .filter(|spec| spec.settable)
        .map(|spec| {
            let value = match spec.kind {
                ParamKind::Int => ParamValue::Int(0),
                ParamKind::Float => ParamValue::Float(0.0),
                ParamKind::Text => ParamValue::Text(String::new()),
            };
            (spec.name, value)
        })
        .collect();

    let overrides = [
        ("rng_seed", ParamValue::Int(1)),
        ("n_total", ParamValue::Int(10_000)),
        ("days_of_interactions", ParamValue::Int(10)),
        ("end_time", ParamValue::Int(100)),
        ("n_seed_infection", ParamValue::Int(5)),
        ("quarantine_days", ParamValue::Int(7)),
        ("test_order_wait", ParamValue::Int(1)),
        ("test_result_wait", ParamValue::Int(1)),
        ("app_users_fraction", ParamValue::Float(0.85)),
        ("self_quarantine_fraction", ParamValue::Float(0.7)),
        ("traceable_interaction_fraction", ParamValue::Float(0.8)),
        ("test_on_symptoms", ParamValue::Int(1)),
    ];
    for (name, value) in overrides {
        if let Some(entry) = values.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        }
    }
    values
}

pub struct FakeModel {
    pub time: u32,
    pub lockdown_on: i64,
    pub app_turned_on: i64,
    pub app_users_fraction: f64,
    pub test_on_symptoms: i64,
    pub quarantine_days: i64,
}

#[derive(Default)]
pub struct FakeEngine {
    calls: Rc<RefCell<Vec<String>>>,
    pub fail_check: Option<String>,
    pub fail_create: Option<String>,
    /// Day a freshly created model starts at
    pub start_time: u32,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle on the call log; stays readable after the engine moves
    pub fn call_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

fn parse_cell(cell: &str) -> ParamValue {
    let cell = cell.trim();
    if let Ok(v) = cell.parse::<i64>() {
        ParamValue::Int(v)
    } else if let Ok(v) = cell.parse::<f64>() {
        ParamValue::Float(v)
    } else {
        ParamValue::Text(cell.to_string())
    }
}

fn read_lines(params: &ParamValues, field: &str) -> Result<Vec<String>, EngineError> {
    let path = params
        .text(field)
        .ok_or_else(|| EngineError::new(format!("{} not set", field)))?;
    let content = fs::read_to_string(path).map_err(|e| EngineError::new(format!("{}: {}", path, e)))?;
    Ok(content.lines().filter(|l| !l.trim().is_empty()).map(str::to_string).collect())
}

impl Engine for FakeEngine {
    type Model = FakeModel;

    fn read_param_file(&mut self, params: &mut ParamValues) -> Result<(), EngineError> {
        self.record("read_param_file");
        let lines = read_lines(params, "input_param_file")?;
        let (header, rows) = lines
            .split_first()
            .ok_or_else(|| EngineError::new("parameter file is empty"))?;

        let line = params.int("param_line_number").unwrap_or(0) as usize;
        let row = rows.get(line).ok_or_else(|| {
            EngineError::new(format!("line {} out of range ({} rows)", line, rows.len()))
        })?;

        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let cells: Vec<&str> = row.split(',').collect();
        if names.len() != cells.len() {
            return Err(EngineError::new("malformed row: column count does not match header"));
        }

        for (name, value) in baseline() {
            params.insert(name, value).map_err(EngineError::new)?;
        }
        // Hospital parameters come from the same file and row
        let hospital_file = params.text("input_param_file").unwrap_or_default().to_string();
        params
            .insert("hospital_input_param_file", hospital_file)
            .map_err(EngineError::new)?;
        params
            .insert("hospital_param_line_number", line as i64)
            .map_err(EngineError::new)?;
        for (name, cell) in names.iter().zip(cells) {
            params.insert(name, parse_cell(cell)).map_err(EngineError::new)?;
        }
        Ok(())
    }

    fn read_household_demographics_file(&mut self, params: &mut ParamValues) -> Result<(), EngineError> {
        self.record("read_household_demographics_file");
        let lines = read_lines(params, "input_household_file")?;
        let households = lines.len().saturating_sub(1);
        if households == 0 {
            return Err(EngineError::new("household file has no households"));
        }
        params
            .insert("N_REFERENCE_HOUSEHOLDS", households as i64)
            .map_err(EngineError::new)
    }

    fn check_params(&self, _params: &ParamValues) -> Result<(), EngineError> {
        self.record("check_params");
        match &self.fail_check {
            Some(message) => Err(EngineError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn create_model(&mut self, params: &ParamValues) -> Result<FakeModel, EngineError> {
        self.record("create_model");
        if let Some(message) = &self.fail_create {
            return Err(EngineError::new(message.clone()));
        }
        Ok(FakeModel {
            time: self.start_time,
            lockdown_on: params.int("lockdown_on").unwrap_or(0),
            app_turned_on: params.int("app_turned_on").unwrap_or(0),
            app_users_fraction: params.float("app_users_fraction").unwrap_or(0.0),
            test_on_symptoms: params.int("test_on_symptoms").unwrap_or(0),
            quarantine_days: params.int("quarantine_days").unwrap_or(0),
        })
    }

    fn one_time_step(&mut self, model: &mut FakeModel) {
        self.record("one_time_step");
        model.time += 1;
    }

    fn model_time(&self, model: &FakeModel) -> u32 {
        model.time
    }

    fn util_n_total(&self, model: &FakeModel, category: Category) -> i64 {
        let weight = match category {
            Category::Presymptomatic => 3,
            Category::Asymptomatic => 2,
            Category::Case => 1,
            _ => 0,
        };
        weight * model.time as i64
    }

    fn util_n_current(&self, model: &FakeModel, category: Category) -> i64 {
        let weight = match category {
            Category::Presymptomatic => 11,
            Category::Asymptomatic => 12,
            Category::Symptomatic => 13,
            Category::Hospitalised => 14,
            Category::Critical => 15,
            Category::Death => 16,
            Category::Recovered => 17,
            Category::Quarantined => 18,
            _ => 0,
        };
        weight * model.time as i64
    }

    fn util_n_daily(&self, _model: &FakeModel, category: Category, day: u32) -> i64 {
        match category {
            Category::TestResult => 10 * day as i64,
            _ => 0,
        }
    }

    fn write_output_files(&mut self, _model: &FakeModel, _params: &ParamValues) -> Result<(), EngineError> {
        self.record("write_output_files");
        Ok(())
    }

    fn destroy_model(&mut self, _model: FakeModel) {
        self.record("destroy_model");
    }

    fn destroy_params(&mut self, _params: ParamValues) {
        self.record("destroy_params");
    }

    fn param_accessors(&self) -> ParamAccessors<FakeModel> {
        ParamAccessors::<FakeModel>::new()
            .int(
                "lockdown_on",
                |m| m.lockdown_on,
                |m, v| {
                    m.lockdown_on = v;
                    true
                },
            )
            .int(
                "app_turned_on",
                |m| m.app_turned_on,
                // Once the app is on it cannot be turned off again
                |m, v| {
                    if m.app_turned_on == 1 && v == 0 {
                        return false;
                    }
                    m.app_turned_on = v;
                    true
                },
            )
            .float(
                "app_users_fraction",
                |m| m.app_users_fraction,
                |m, v| {
                    m.app_users_fraction = v;
                    true
                },
            )
            .int(
                "test_on_symptoms",
                |m| m.test_on_symptoms,
                |m, v| {
                    m.test_on_symptoms = v;
                    true
                },
            )
            .int_read_only("quarantine_days", |m| m.quarantine_days)
            .int_read_only("tracing_network_depth", |_| -1)
    }
}

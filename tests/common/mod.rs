//! Recording engine shared by the integration tests.

use epistep::engine::{Category, Engine, EngineError, ParamAccessors};
use epistep::params::{LoadRequest, ParamKind, ParamValue, ParamValues, SCHEMA};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

pub struct Model {
    pub time: u32,
    pub lockdown_on: i64,
    pub app_users_fraction: f64,
}

#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Rc<RefCell<Vec<String>>>,
    pub refuse_updates: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

/// Write a parameter file whose rows are `key=value;...` lists and a
/// household file into `dir`
pub fn write_inputs(dir: &Path, rows: &[&str], line: u32) -> LoadRequest {
    let params = dir.join("params.txt");
    fs::write(&params, format!("{}\n", rows.join("\n"))).unwrap();
    let households = dir.join("households.txt");
    fs::write(&households, "1 0 0\n0 2 0\n").unwrap();

    LoadRequest {
        input_param_file: params,
        param_line_number: line,
        output_file_dir: dir.to_path_buf(),
        input_household_file: households,
    }
}

fn fill_defaults(params: &mut ParamValues) {
    for spec in SCHEMA.iter().filter(|spec| spec.settable) {
        let value = match spec.name {
            "n_total" => ParamValue::Int(50_000),
            "n_seed_infection" => ParamValue::Int(10),
            "days_of_interactions" => ParamValue::Int(10),
            "end_time" => ParamValue::Int(200),
            "quarantine_days" => ParamValue::Int(7),
            "app_users_fraction" => ParamValue::Float(0.8),
            _ => match spec.kind {
                ParamKind::Int => ParamValue::Int(0),
                ParamKind::Float => ParamValue::Float(0.0),
                ParamKind::Text => ParamValue::Text(String::new()),
            },
        };
        params.insert(spec.name, value).unwrap();
    }
}

impl Engine for RecordingEngine {
    type Model = Model;

    fn read_param_file(&mut self, params: &mut ParamValues) -> Result<(), EngineError> {
        self.record("read_param_file");
        let path = params.text("input_param_file").unwrap_or_default().to_string();
        let content = fs::read_to_string(&path).map_err(|e| EngineError::new(e.to_string()))?;
        let line = params.int("param_line_number").unwrap_or(0) as usize;
        let row = content
            .lines()
            .nth(line)
            .ok_or_else(|| EngineError::new(format!("no line {} in {}", line, path)))?
            .to_string();

        fill_defaults(params);
        params.insert("hospital_input_param_file", path.as_str()).map_err(EngineError::new)?;
        params
            .insert("hospital_param_line_number", line as i64)
            .map_err(EngineError::new)?;
        for pair in row.split(';').filter(|p| !p.trim().is_empty()) {
            let (name, raw) = pair
                .split_once('=')
                .ok_or_else(|| EngineError::new(format!("malformed entry '{}'", pair)))?;
            let value = match raw.trim().parse::<i64>() {
                Ok(v) => ParamValue::Int(v),
                Err(_) => ParamValue::Float(
                    raw.trim()
                        .parse::<f64>()
                        .map_err(|_| EngineError::new(format!("bad number '{}'", raw)))?,
                ),
            };
            params.insert(name.trim(), value).map_err(EngineError::new)?;
        }
        Ok(())
    }

    fn read_household_demographics_file(&mut self, params: &mut ParamValues) -> Result<(), EngineError> {
        self.record("read_household_demographics_file");
        params.insert("N_REFERENCE_HOUSEHOLDS", 2).map_err(EngineError::new)
    }

    fn check_params(&self, _params: &ParamValues) -> Result<(), EngineError> {
        self.record("check_params");
        Ok(())
    }

    fn create_model(&mut self, params: &ParamValues) -> Result<Model, EngineError> {
        self.record("create_model");
        Ok(Model {
            time: 0,
            lockdown_on: params.int("lockdown_on").unwrap_or(0),
            app_users_fraction: params.float("app_users_fraction").unwrap_or(0.0),
        })
    }

    fn one_time_step(&mut self, model: &mut Model) {
        self.record("one_time_step");
        model.time += 1;
    }

    fn model_time(&self, model: &Model) -> u32 {
        model.time
    }

    fn util_n_total(&self, model: &Model, category: Category) -> i64 {
        match category {
            Category::Presymptomatic | Category::Asymptomatic => model.time as i64,
            _ => 0,
        }
    }

    fn util_n_current(&self, _model: &Model, _category: Category) -> i64 {
        0
    }

    fn util_n_daily(&self, _model: &Model, _category: Category, _day: u32) -> i64 {
        0
    }

    fn write_output_files(&mut self, _model: &Model, _params: &ParamValues) -> Result<(), EngineError> {
        self.record("write_output_files");
        Ok(())
    }

    fn destroy_model(&mut self, _model: Model) {
        self.record("destroy_model");
    }

    fn destroy_params(&mut self, _params: ParamValues) {
        self.record("destroy_params");
    }

    fn param_accessors(&self) -> ParamAccessors<Model> {
        let accessors = ParamAccessors::<Model>::new().int(
            "lockdown_on",
            |m: &Model| m.lockdown_on,
            |m: &mut Model, v| {
                m.lockdown_on = v;
                true
            },
        );
        if self.refuse_updates {
            accessors.float("app_users_fraction", |m: &Model| m.app_users_fraction, |_, _| false)
        } else {
            accessors.float(
                "app_users_fraction",
                |m: &Model| m.app_users_fraction,
                |m: &mut Model, v| {
                    m.app_users_fraction = v;
                    true
                },
            )
        }
    }
}

//! Parameter values and kind coercion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a named parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    Int,
    Float,
    Text,
}

impl ParamKind {
    /// Returns a string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Int => "integer",
            ParamKind::Float => "float",
            ParamKind::Text => "text",
        }
    }
}

/// A single parameter value as stored in a parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert this value into the given declared kind.
    ///
    /// Floats are accepted for integer parameters only when they are finite
    /// and integral (`1.0` becomes `1`, `0.5` is rejected). Text never
    /// converts to or from a number.
    ///
    /// # Returns
    /// * `Ok(ParamValue)` - The value in the declared kind
    /// * `Err(String)` - Why the value cannot be represented
    pub fn coerce_to(self, kind: ParamKind) -> Result<ParamValue, String> {
        match (kind, self) {
            (ParamKind::Int, ParamValue::Int(v)) => Ok(ParamValue::Int(v)),
            (ParamKind::Int, ParamValue::Float(v)) => {
                if !v.is_finite() {
                    return Err(format!("{} is not a finite number", v));
                }
                if v.fract() != 0.0 {
                    return Err(format!("{} has a fractional part but the parameter is an integer", v));
                }
                // i64::MAX as f64 rounds up to 2^63, which does not fit
                if v < i64::MIN as f64 || v >= i64::MAX as f64 {
                    return Err(format!("{} is out of integer range", v));
                }
                Ok(ParamValue::Int(v as i64))
            }
            (ParamKind::Float, ParamValue::Int(v)) => Ok(ParamValue::Float(v as f64)),
            (ParamKind::Float, ParamValue::Float(v)) => {
                if v.is_finite() {
                    Ok(ParamValue::Float(v))
                } else {
                    Err(format!("{} is not a finite number", v))
                }
            }
            (ParamKind::Text, ParamValue::Text(s)) => Ok(ParamValue::Text(s)),
            (kind, value) => Err(format!(
                "expected {} but got {} value '{}'",
                kind.as_str(),
                value.kind().as_str(),
                value
            )),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

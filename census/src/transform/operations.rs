//! Cell operations used to clean raw census values.
//!
//! Operations work on `serde_json::Value` cells: `Null` is a missing value,
//! `String` is raw text and `Number` is a parsed value. An operation that
//! does not apply to a cell returns it unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Value flags the census publishes in place of a number.
pub const CENSUS_FLAGS: [&str; 8] = ["D", "F", "FN", "NA", "S", "X", "Z", "-"];

/// All available cleaning operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Remove leading and trailing whitespace
    Trim,

    /// Remove every leading occurrence of a symbol
    StripPrefix { value: String },

    /// Remove every trailing occurrence of a symbol
    StripSuffix { value: String },

    /// Parse to a number; thousands separators are ignored, census flags
    /// and empty text become missing
    ToNumber,

    /// Divide a number by a constant
    Divide { by: f64 },
}

impl Operation {
    /// Apply this operation to a value
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Operation::Trim => self.apply_trim(value),
            Operation::StripPrefix { value: prefix } => self.apply_strip_prefix(value, prefix),
            Operation::StripSuffix { value: suffix } => self.apply_strip_suffix(value, suffix),
            Operation::ToNumber => self.apply_to_number(value),
            Operation::Divide { by } => self.apply_divide(value, *by),
        }
    }

    fn apply_trim(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            _ => value.clone(),
        }
    }

    fn apply_strip_prefix(&self, value: &Value, prefix: &str) -> Value {
        match value {
            Value::String(s) if !prefix.is_empty() => {
                Value::String(s.trim_start_matches(prefix).to_string())
            }
            _ => value.clone(),
        }
    }

    fn apply_strip_suffix(&self, value: &Value, suffix: &str) -> Value {
        match value {
            Value::String(s) if !suffix.is_empty() => {
                Value::String(s.trim_end_matches(suffix).to_string())
            }
            _ => value.clone(),
        }
    }

    fn apply_to_number(&self, value: &Value) -> Value {
        let Value::String(s) = value else {
            return value.clone();
        };

        let text = s.trim();
        if text.is_empty() || CENSUS_FLAGS.contains(&text) {
            return Value::Null;
        }

        let digits: String = text.chars().filter(|c| *c != ',').collect();
        match digits.parse::<f64>() {
            Ok(n) if n.is_finite() => number(n),
            // Left as text so the caller can report it
            _ => value.clone(),
        }
    }

    fn apply_divide(&self, value: &Value, by: f64) -> Value {
        match value.as_f64() {
            Some(n) if by != 0.0 => number(n / by),
            _ => value.clone(),
        }
    }
}

/// Run a chain of operations over one value.
pub fn apply_all(operations: &[Operation], value: Value) -> Value {
    operations.iter().fold(value, |acc, op| op.apply(&acc))
}

fn number(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

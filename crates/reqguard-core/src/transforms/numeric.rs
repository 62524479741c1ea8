//! Numeric coercions
//!
//! Failed parses leave the value as it was, so a later kind check reports
//! the problem.

use super::{map_scalar_or_array, Transform};
use crate::value::Value;

/// Coerce strings and floats to integers.
///
/// Strings must parse as a decimal i64. Floats truncate toward zero when the
/// result fits in an i64.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToInt;

impl Transform for ToInt {
    fn apply(&self, value: Value) -> Value {
        map_scalar_or_array(value, |item| match item {
            Value::String(s) => match s.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::String(s),
            },
            Value::Float(f) => match float_to_int(f) {
                Some(i) => Value::Integer(i),
                None => Value::Float(f),
            },
            other => other,
        })
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let truncated = f.trunc();
    if truncated.is_finite() && truncated >= -LIMIT && truncated < LIMIT {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Coerce strings and integers to floats
#[derive(Debug, Clone, Copy, Default)]
pub struct ToFloat;

impl Transform for ToFloat {
    fn apply(&self, value: Value) -> Value {
        map_scalar_or_array(value, |item| match item {
            Value::String(s) => match s.parse::<f64>() {
                Ok(f) => Value::Float(f),
                Err(_) => Value::String(s),
            },
            Value::Integer(i) => Value::Float(i as f64),
            other => other,
        })
    }
}

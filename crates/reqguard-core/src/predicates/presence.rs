use super::{Predicate, PredicateResult};
use crate::error::PredicateError;
use crate::value::Value;

/// Rejects null, empty and zero values.
///
/// Strings, arrays and objects fail when empty, numbers when zero and
/// booleans when false. Records always pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNotEmpty;

impl Predicate for IsNotEmpty {
    fn check(&self, value: &Value) -> PredicateResult {
        let reason = match value {
            Value::Null => "value is null",
            Value::String(s) if s.is_empty() => "value is empty",
            Value::Array(items) if items.is_empty() => "value is empty",
            Value::Object(map) if map.is_empty() => "value is empty",
            Value::Integer(0) => "value is zero",
            Value::Float(f) if *f == 0.0 => "value is zero",
            Value::Bool(false) => "value is false",
            _ => return Ok(()),
        };
        Err(PredicateError::new(reason))
    }
}

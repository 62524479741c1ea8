//! Primitive transform library
//!
//! Transforms are total: a value of the wrong kind comes back unchanged.
//! String transforms also accept arrays and rewrite each element.

mod case;
mod numeric;
mod text;

pub use case::{TitleCase, TitleLocale, ToLower, ToUpper};
pub use numeric::{ToFloat, ToInt};
pub use text::{RemoveSpecialChars, Replace, Trim, Truncate};

use std::fmt;

use crate::value::Value;

/// A total value rewrite applied before a field's checks
pub trait Transform: fmt::Debug + Send + Sync {
    fn apply(&self, value: Value) -> Value;
}

/// Apply `f` to a scalar, or to every element of an array
pub fn map_scalar_or_array<F>(value: Value, f: F) -> Value
where
    F: Fn(Value) -> Value,
{
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(f).collect()),
        scalar => f(scalar),
    }
}

/// Apply `f` to string payloads, passing other values through
pub(crate) fn map_strings<F>(value: Value, f: F) -> Value
where
    F: Fn(String) -> String,
{
    map_scalar_or_array(value, |item| match item {
        Value::String(s) => Value::String(f(s)),
        other => other,
    })
}

/// Transform backed by a closure
pub struct FnTransform<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform").field("name", &self.name).finish()
    }
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn apply(&self, value: Value) -> Value {
        (self.f)(value)
    }
}

/// Wrap a closure as a named transform
pub fn transform_fn<F>(name: impl Into<String>, f: F) -> FnTransform<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    FnTransform {
        name: name.into(),
        f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_scalar_or_array() {
        let double = |v: Value| match v {
            Value::Integer(i) => Value::Integer(i * 2),
            other => other,
        };
        assert_eq!(map_scalar_or_array(Value::Integer(2), double), Value::Integer(4));
        assert_eq!(
            map_scalar_or_array(Value::from(json!([1, "a", 3])), double),
            Value::from(json!([2, "a", 6]))
        );
    }

    #[test]
    fn test_map_strings_skips_other_kinds() {
        let shout = |s: String| s.to_uppercase();
        assert_eq!(map_strings(Value::Bool(true), shout), Value::Bool(true));
        assert_eq!(
            map_strings(Value::from(json!(["a", null, {"k": "v"}])), shout),
            Value::from(json!(["A", null, {"k": "v"}]))
        );
    }

    #[test]
    fn test_transform_fn() {
        let negate = transform_fn("negate", |v| match v {
            Value::Bool(b) => Value::Bool(!b),
            other => other,
        });
        assert_eq!(negate.apply(Value::Bool(true)), Value::Bool(false));
        assert!(format!("{:?}", negate).contains("negate"));
    }
}

//! Kind predicates
//!
//! Numbers are classified by their stored kind only. `IsInt` rejects
//! `Float(2.0)` and `IsFloat` rejects `Integer(2)`.

use super::{Predicate, PredicateResult};
use crate::error::PredicateError;
use crate::value::Value;

macro_rules! kind_predicate {
    ($(#[$doc:meta])* $name:ident, $message:literal, $pattern:pat) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Predicate for $name {
            fn check(&self, value: &Value) -> PredicateResult {
                if matches!(value, $pattern) {
                    Ok(())
                } else {
                    Err(PredicateError::new($message))
                }
            }
        }
    };
}

kind_predicate!(
    /// Accepts strings
    IsString,
    "value must be a string",
    Value::String(_)
);
kind_predicate!(
    /// Accepts integers and floats
    IsNumber,
    "value must be a number",
    Value::Integer(_) | Value::Float(_)
);
kind_predicate!(IsInt, "value must be an integer", Value::Integer(_));
kind_predicate!(IsFloat, "value must be a float", Value::Float(_));
kind_predicate!(IsBool, "value must be a boolean", Value::Bool(_));
kind_predicate!(IsArray, "value must be an array", Value::Array(_));
kind_predicate!(
    /// Accepts objects and records
    IsObject,
    "value must be an object",
    Value::Object(_) | Value::Record(_)
);

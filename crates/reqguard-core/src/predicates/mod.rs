//! Primitive predicate library
//!
//! A predicate inspects a value and either accepts it or reports why not.
//! Predicates never modify plain values; only the combinators that evaluate
//! element schemas write transformed elements back.

mod each;
mod format;
mod image;
mod kind;
mod membership;
mod presence;
mod range;

pub use each::{Each, EachWithOptions};
pub use format::{
    luhn_valid, IsAlpha, IsAlphaArabic, IsAlphanumeric, IsArabic, IsBase64, IsCreditCard,
    IsDate, IsEmail, IsHexColor, IsIp, IsJson, IsTime, IsUrl, IsUuid, Matches,
};
pub use image::{sniff_image, ImageKind, IsBase64Image};
pub use kind::{IsArray, IsBool, IsFloat, IsInt, IsNumber, IsObject, IsString};
pub use membership::{IsIn, IsInArray, IsNotIn, IsNotInArray};
pub use presence::IsNotEmpty;
pub use range::{Length, Max, MaxLength, Min, MinLength};

use std::fmt;

use crate::engine::Scope;
use crate::error::PredicateError;
use crate::value::Value;

/// Result of a single predicate
pub type PredicateResult = Result<(), PredicateError>;

/// A check applied to one field value
pub trait Predicate: fmt::Debug + Send + Sync {
    /// Check a value without modifying it
    fn check(&self, value: &Value) -> PredicateResult;

    /// Check a value held by the object under evaluation.
    ///
    /// The engine always calls this form. Combinators that run sub-schemas
    /// override it so element transforms land in the stored value.
    fn check_in_place(&self, value: &mut Value, _scope: &Scope<'_>) -> PredicateResult {
        self.check(value)
    }
}

/// Predicate backed by a closure
pub struct FnPredicate<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate").field("name", &self.name).finish()
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Value) -> PredicateResult + Send + Sync,
{
    fn check(&self, value: &Value) -> PredicateResult {
        (self.f)(value)
    }
}

/// Wrap a closure as a named predicate
pub fn predicate_fn<F>(name: impl Into<String>, f: F) -> FnPredicate<F>
where
    F: Fn(&Value) -> PredicateResult + Send + Sync,
{
    FnPredicate {
        name: name.into(),
        f,
    }
}

/// Borrow the string payload or fail with the shared kind message
pub(crate) fn expect_str(value: &Value) -> Result<&str, PredicateError> {
    value.as_str().ok_or_else(PredicateError::not_a_string)
}

/// Render a list of values the way membership messages show them
pub(crate) fn format_list(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_fn() {
        let even = predicate_fn("even", |value: &Value| match value {
            Value::Integer(i) if i % 2 == 0 => Ok(()),
            _ => Err(PredicateError::new("value must be even")),
        });
        assert!(even.check(&Value::Integer(4)).is_ok());
        assert_eq!(
            even.check(&Value::Integer(3)).unwrap_err().message,
            "value must be even"
        );
        assert!(format!("{:?}", even).contains("even"));
    }

    #[test]
    fn test_check_in_place_defaults_to_check() {
        let engine = crate::engine::Engine::default();
        let scope = Scope::root(&engine);
        let mut value = Value::from("kept");
        assert!(IsNotEmpty.check_in_place(&mut value, &scope).is_ok());
        assert_eq!(value, Value::from("kept"));
        let mut empty = Value::from("");
        assert_eq!(
            IsNotEmpty.check_in_place(&mut empty, &scope),
            IsNotEmpty.check(&Value::from(""))
        );
    }

    #[test]
    fn test_format_list() {
        let list = vec![Value::from("a"), Value::Integer(2), Value::Bool(true)];
        assert_eq!(format_list(&list), "[a, 2, true]");
        assert_eq!(format_list(&[]), "[]");
    }
}

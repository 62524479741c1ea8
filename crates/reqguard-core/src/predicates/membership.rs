//! Membership predicates
//!
//! Comparison is by value equality, kind included: `Integer(1)` is not a
//! member of `[Float(1.0)]`.

use super::{format_list, Predicate, PredicateResult};
use crate::error::PredicateError;
use crate::value::Value;

/// Value must equal one of a fixed list
#[derive(Debug, Clone, Default)]
pub struct IsIn {
    pub allowed: Vec<Value>,
}

impl IsIn {
    pub fn new<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for IsIn {
    fn check(&self, value: &Value) -> PredicateResult {
        require_member(value, &self.allowed)
    }
}

/// Value must differ from every entry of a fixed list
#[derive(Debug, Clone, Default)]
pub struct IsNotIn {
    pub disallowed: Vec<Value>,
}

impl IsNotIn {
    pub fn new<I, V>(disallowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            disallowed: disallowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for IsNotIn {
    fn check(&self, value: &Value) -> PredicateResult {
        require_non_member(value, &self.disallowed)
    }
}

/// Value must equal an element of a list supplied as a value.
///
/// The list is usually built at runtime, for example from a lookup table.
#[derive(Debug, Clone)]
pub struct IsInArray {
    pub list: Value,
}

impl IsInArray {
    pub fn new(list: impl Into<Value>) -> Self {
        Self { list: list.into() }
    }
}

impl Predicate for IsInArray {
    fn check(&self, value: &Value) -> PredicateResult {
        require_member(value, list_items(&self.list)?)
    }
}

/// Value must not equal any element of a list supplied as a value
#[derive(Debug, Clone)]
pub struct IsNotInArray {
    pub list: Value,
}

impl IsNotInArray {
    pub fn new(list: impl Into<Value>) -> Self {
        Self { list: list.into() }
    }
}

impl Predicate for IsNotInArray {
    fn check(&self, value: &Value) -> PredicateResult {
        require_non_member(value, list_items(&self.list)?)
    }
}

fn list_items(list: &Value) -> Result<&[Value], PredicateError> {
    list.as_array().ok_or_else(|| {
        PredicateError::new(format!("expected an array, got {}", list.kind()))
    })
}

fn require_member(value: &Value, allowed: &[Value]) -> PredicateResult {
    if allowed.contains(value) {
        Ok(())
    } else {
        Err(PredicateError::new(format!(
            "value must be one of {}",
            format_list(allowed)
        )))
    }
}

fn require_non_member(value: &Value, disallowed: &[Value]) -> PredicateResult {
    if disallowed.contains(value) {
        Err(PredicateError::new(format!(
            "value must not be one of {}",
            format_list(disallowed)
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in() {
        let fruit = IsIn::new(["apple", "banana"]);
        assert!(fruit.check(&Value::from("apple")).is_ok());
        assert_eq!(
            fruit.check(&Value::from("cherry")).unwrap_err().message,
            "value must be one of [apple, banana]"
        );
    }

    #[test]
    fn test_is_not_in() {
        let banned = IsNotIn::new(["root", "admin"]);
        assert!(banned.check(&Value::from("alice")).is_ok());
        assert_eq!(
            banned.check(&Value::from("admin")).unwrap_err().message,
            "value must not be one of [root, admin]"
        );
    }

    #[test]
    fn test_equality_is_kind_sensitive() {
        let numbers = IsIn::new([1i64, 2]);
        assert!(numbers.check(&Value::Integer(1)).is_ok());
        assert!(numbers.check(&Value::Float(1.0)).is_err());
        assert!(numbers.check(&Value::from("1")).is_err());
    }

    #[test]
    fn test_runtime_lists() {
        let list = Value::Array(vec![Value::from("red"), Value::from("green")]);
        assert!(IsInArray::new(list.clone()).check(&Value::from("red")).is_ok());
        assert!(IsInArray::new(list.clone()).check(&Value::from("blue")).is_err());
        assert!(IsNotInArray::new(list.clone()).check(&Value::from("blue")).is_ok());
        assert_eq!(
            IsNotInArray::new(list).check(&Value::from("green")).unwrap_err().message,
            "value must not be one of [red, green]"
        );
    }

    #[test]
    fn test_runtime_list_must_be_an_array() {
        let err = IsInArray::new("red").check(&Value::from("red")).unwrap_err();
        assert_eq!(err.message, "expected an array, got string");
        let err = IsNotInArray::new(Value::Null).check(&Value::from("red")).unwrap_err();
        assert_eq!(err.message, "expected an array, got null");
    }
}

//! Generic value tree
//!
//! Request bodies arrive untyped, so the engine works over a tagged union
//! that mirrors decoded JSON plus an opaque `Record` variant for host types
//! that can export their fields as a mapping.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Mapping of field names to values, one level of an object tree
pub type Object = BTreeMap<String, Value>;

/// Capability for host types that want to be validated like objects.
///
/// Implementors export their named fields as an owned mapping; the engine
/// evaluates that mapping whenever a record appears where an object is
/// expected.
pub trait ObjectView: fmt::Debug + Send + Sync {
    /// The record's fields as a mapping
    fn object_view(&self) -> Object;
}

/// A dynamically typed value
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Record(Arc<dyn ObjectView>),
}

/// The kind of a [`Value`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
    Record,
}

impl ValueKind {
    /// Human-readable kind name
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value widened to f64; integers and floats only
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Owned object form of an object or record
    pub fn to_object(&self) -> Option<Object> {
        match self {
            Value::Object(map) => Some(map.clone()),
            Value::Record(record) => Some(record.object_view()),
            _ => None,
        }
    }

    /// Build a record value from a host type
    pub fn record<R: ObjectView + 'static>(record: R) -> Self {
        Value::Record(Arc::new(record))
    }

    /// Convert to a JSON value.
    ///
    /// Records export their object view; non-finite floats become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => object_to_json(map),
            Value::Record(record) => object_to_json(&record.object_view()),
        }
    }
}

fn object_to_json(map: &Object) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl ObjectView for Point {
        fn object_view(&self) -> Object {
            let mut map = Object::new();
            map.insert("x".to_string(), Value::Integer(self.x));
            map.insert("y".to_string(), Value::Integer(self.y));
            map
        }
    }

    #[test]
    fn test_json_numbers_keep_their_kind() {
        let value = Value::from(json!({"count": 3, "ratio": 0.5, "big": 18446744073709551615u64}));
        let map = value.as_object().unwrap();
        assert_eq!(map["count"], Value::Integer(3));
        assert_eq!(map["ratio"], Value::Float(0.5));
        assert_eq!(map["big"].kind(), ValueKind::Float);
    }

    #[test]
    fn test_kind_participates_in_equality() {
        assert_ne!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(Value::from("a"), Value::String("a".to_string()));
    }

    #[test]
    fn test_record_equality_is_identity() {
        let a = Value::record(Point { x: 1, y: 2 });
        let b = a.clone();
        let c = Value::record(Point { x: 1, y: 2 });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_exports_object_view() {
        let value = Value::record(Point { x: 4, y: -1 });
        let map = value.to_object().unwrap();
        assert_eq!(map["x"], Value::Integer(4));
        assert_eq!(value.to_json(), json!({"x": 4, "y": -1}));
        assert!(Value::Integer(1).to_object().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("apple").to_string(), "apple");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(
            Value::Array(vec![Value::from("a"), Value::Bool(true)]).to_string(),
            r#"["a",true]"#
        );
    }

    #[test]
    fn test_non_finite_float_serializes_as_null() {
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_serde_roundtrip_through_json() {
        let value: Value = serde_json::from_str(r#"{"tags":["a","b"],"n":null}"#).unwrap();
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"n":null,"tags":["a","b"]}"#);
    }
}

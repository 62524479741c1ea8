//! Rule schema
//!
//! A schema is an ordered list of field rules describing one level of an
//! object tree. Rule order is evaluation order, and evaluation stops at the
//! first failure, so order decides which message a client sees.
//!
//! # Example
//!
//! ```rust
//! use reqguard_core::predicates::{IsEmail, IsNotEmpty, MinLength};
//! use reqguard_core::schema::{FieldRule, Schema};
//! use reqguard_core::transforms::{ToLower, Trim};
//!
//! let schema = Schema::builder()
//!     .field(
//!         FieldRule::required("email")
//!             .transform(Trim)
//!             .transform(ToLower)
//!             .check(IsNotEmpty, "Email is required")
//!             .check(IsEmail, "Invalid email address"),
//!     )
//!     .field(FieldRule::optional("password").check(MinLength::new(6), ""))
//!     .build()
//!     .unwrap();
//! assert_eq!(schema.len(), 2);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::predicates::Predicate;
use crate::transforms::Transform;

/// A predicate paired with the message surfaced when it fails.
///
/// An empty message means the predicate's own error text is surfaced.
#[derive(Debug, Clone)]
pub struct Check {
    pub predicate: Arc<dyn Predicate>,
    pub message: String,
}

impl Check {
    pub fn new<P: Predicate + 'static>(predicate: P, message: impl Into<String>) -> Self {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// A check that reports the predicate's own message
    pub fn bare<P: Predicate + 'static>(predicate: P) -> Self {
        Self::new(predicate, String::new())
    }
}

/// Validation rules for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field name in the object
    pub key: String,
    /// Whether a missing field is skipped
    pub optional: bool,
    /// Applied in order before any check
    pub transforms: Vec<Arc<dyn Transform>>,
    /// Applied in order; the first failure wins
    pub checks: Vec<Check>,
    /// Schema for the field's object value
    pub nested: Option<Schema>,
}

impl FieldRule {
    /// A field that must be present
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            optional: false,
            transforms: Vec::new(),
            checks: Vec::new(),
            nested: None,
        }
    }

    /// A field that is skipped entirely when absent
    pub fn optional(key: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::required(key)
        }
    }

    /// Append a transform
    pub fn transform<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Append a predicate with the message reported on failure
    pub fn check<P: Predicate + 'static>(mut self, predicate: P, message: impl Into<String>) -> Self {
        self.checks.push(Check::new(predicate, message));
        self
    }

    /// Append a predicate that reports its own message on failure
    pub fn check_with<P: Predicate + 'static>(mut self, predicate: P) -> Self {
        self.checks.push(Check::bare(predicate));
        self
    }

    /// Append a prebuilt check
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Validate the field's object value against a sub-schema
    pub fn nested(mut self, schema: Schema) -> Self {
        self.nested = Some(schema);
        self
    }
}

/// Ordered, immutable list of field rules.
///
/// Cloning is cheap; the rules are shared.
#[derive(Clone, Default)]
pub struct Schema {
    rules: Arc<[FieldRule]>,
}

impl Schema {
    /// Build a schema, rejecting duplicate keys
    pub fn new(rules: Vec<FieldRule>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if !seen.insert(rule.key.as_str()) {
                return Err(SchemaError::duplicate_key(&rule.key));
            }
        }
        Ok(Self {
            rules: rules.into(),
        })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Look up the rule for a key
    pub fn get(&self, key: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    /// Keys in evaluation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}

/// Fluent builder for [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    rules: Vec<FieldRule>,
}

impl SchemaBuilder {
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::new(self.rules)
    }
}

//! Error types for reqguard
//!
//! Evaluation failures, predicate failures and schema construction errors
//! are kept apart: the first two are client-facing and carry only
//! static or parameter-templated text, the last one is a programming error
//! surfaced when a schema is built.

use thiserror::Error;

/// The single error returned by an evaluation.
///
/// `Display` renders exactly the message meant for the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A non-optional field is absent from the object
    #[error("{field} is required")]
    Required { field: String },

    /// A field with a nested schema does not hold an object
    #[error("{field} must be an object")]
    NotAnObject { field: String },

    /// A predicate attached to the field failed
    #[error("{message}")]
    Rejected { field: String, message: String },

    /// Nested schemas or element schemas recursed past the configured limit
    #[error("schema nesting exceeds maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

impl ValidationError {
    /// Create a "required" error
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Create a "must be an object" error
    pub fn not_an_object(field: impl Into<String>) -> Self {
        ValidationError::NotAnObject {
            field: field.into(),
        }
    }

    /// Create a predicate rejection
    pub fn rejected(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::Rejected {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotAnObject { field }
            | ValidationError::Rejected { field, .. } => Some(field),
            ValidationError::DepthExceeded { .. } => None,
        }
    }

    /// Stable code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "REQUIRED",
            ValidationError::NotAnObject { .. } => "NOT_AN_OBJECT",
            ValidationError::Rejected { .. } => "REJECTED",
            ValidationError::DepthExceeded { .. } => "DEPTH_EXCEEDED",
        }
    }
}

/// Failure reported by a single predicate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PredicateError {
    pub message: String,
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The canonical "wrong kind" failure shared by every string predicate
    pub fn not_a_string() -> Self {
        Self::new("value must be a string")
    }

    /// Prefix the message with the failing element's position
    pub fn at_index(index: usize, inner: impl std::fmt::Display) -> Self {
        Self::new(format!("element at index {}: {}", index, inner))
    }
}

impl From<ValidationError> for PredicateError {
    fn from(err: ValidationError) -> Self {
        PredicateError::new(err.to_string())
    }
}

/// Errors raised while building a schema or a predicate.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two rules at the same level name the same key
    #[error("duplicate rule for key '{key}'")]
    DuplicateKey { key: String },

    /// A pattern handed to a regex predicate does not compile
    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl SchemaError {
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        SchemaError::DuplicateKey { key: key.into() }
    }
}

/// Invalid configuration supplied through the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid_value(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for evaluations
pub type Result<T> = std::result::Result<T, ValidationError>;

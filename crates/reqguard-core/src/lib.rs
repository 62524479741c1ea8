//! reqguard core
//!
//! A declarative validation engine for decoded request bodies. Callers
//! describe each expected field once, as a rule with transforms, predicate
//! checks and an optional nested schema, and the engine walks an object tree
//! against that description.
//!
//! ## Features
//!
//! - **Field rules**: required or optional keys, evaluated in declaration order
//! - **Transforms**: total value rewrites (trim, case, coercion) written back
//!   into the object before any check runs
//! - **Predicates**: kind, membership, length, range and string format checks
//!   with fixed client-facing messages
//! - **Nesting**: sub-schemas for object fields and for every element of an
//!   array of objects
//! - **First error wins**: evaluation stops at the first failing rule at any
//!   depth and reports a single message
//!
//! ## Evaluation contract
//!
//! The object is mutated in place. Transformed values remain in the object
//! even when a later rule fails, so callers may observe partially normalised
//! data on error paths.
//!
//! ## Example
//!
//! ```rust
//! use reqguard_core::predicates::{IsAlphanumeric, IsEmail, IsNotEmpty, MinLength};
//! use reqguard_core::transforms::{ToLower, Trim};
//! use reqguard_core::{evaluate, FieldRule, Object, Schema, Value};
//!
//! let schema = Schema::builder()
//!     .field(
//!         FieldRule::required("username")
//!             .transform(Trim)
//!             .check(IsNotEmpty, "Username is required")
//!             .check(IsAlphanumeric, "Username must be alphanumeric"),
//!     )
//!     .field(
//!         FieldRule::required("email")
//!             .transform(Trim)
//!             .transform(ToLower)
//!             .check(IsEmail, "Invalid email address"),
//!     )
//!     .field(FieldRule::optional("password").check(MinLength::new(6), ""))
//!     .build()
//!     .unwrap();
//!
//! let mut body = Object::new();
//! body.insert("username".into(), Value::from(" user123 "));
//! body.insert("email".into(), Value::from("User@Example.com"));
//!
//! evaluate(&mut body, &schema).unwrap();
//! assert_eq!(body["username"], Value::from("user123"));
//! assert_eq!(body["email"], Value::from("user@example.com"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod predicates;
pub mod schema;
pub mod transforms;
pub mod value;

pub use config::EngineConfig;
pub use engine::{evaluate, Engine, Scope};
pub use error::{ConfigError, PredicateError, Result, SchemaError, ValidationError};
pub use predicates::{predicate_fn, Predicate};
pub use schema::{Check, FieldRule, Schema, SchemaBuilder};
pub use transforms::{map_scalar_or_array, transform_fn, Transform};
pub use value::{Object, ObjectView, Value, ValueKind};

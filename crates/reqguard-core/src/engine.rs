//! Evaluation engine
//!
//! Walks a schema in order against a mutable object. For every rule the
//! engine checks presence, folds the transforms into the stored value, runs
//! the checks until one fails and finally recurses into a nested schema.
//!
//! The object is modified in place. Values transformed before a failure stay
//! transformed, so callers see partially normalised data on error paths.

use std::mem;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::{Result, ValidationError};
use crate::schema::{FieldRule, Schema};
use crate::value::{Object, Value};

/// Evaluate an object against a schema with the default engine
pub fn evaluate(object: &mut Object, schema: &Schema) -> Result<()> {
    Engine::default().evaluate(object, schema)
}

/// The validation engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate an object against a schema, returning the first error
    pub fn evaluate(&self, object: &mut Object, schema: &Schema) -> Result<()> {
        Scope::root(self).evaluate(object, schema)
    }
}

/// Position of an evaluation within the schema tree.
///
/// Combinators that evaluate sub-schemas receive the scope so recursion
/// shares the engine's depth limit.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    engine: &'a Engine,
    depth: usize,
}

impl<'a> Scope<'a> {
    pub fn root(engine: &'a Engine) -> Self {
        Self { engine, depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn engine(&self) -> &'a Engine {
        self.engine
    }

    /// Evaluate a sub-schema one level deeper
    pub fn evaluate_nested(&self, object: &mut Object, schema: &Schema) -> Result<()> {
        self.descend()?.evaluate(object, schema)
    }

    fn descend(&self) -> Result<Scope<'a>> {
        let depth = self.depth + 1;
        let limit = self.engine.config.max_depth;
        if depth > limit {
            debug!(depth, limit, "Schema nesting limit exceeded");
            return Err(ValidationError::DepthExceeded { limit });
        }
        Ok(Scope {
            engine: self.engine,
            depth,
        })
    }

    fn evaluate(&self, object: &mut Object, schema: &Schema) -> Result<()> {
        for rule in schema.rules() {
            let Some(slot) = object.get_mut(&rule.key) else {
                if rule.optional {
                    trace!(field = %rule.key, depth = self.depth, "Optional field absent");
                    continue;
                }
                debug!(field = %rule.key, depth = self.depth, "Required field missing");
                return Err(ValidationError::required(&rule.key));
            };

            apply_transforms(rule, slot);
            self.run_checks(rule, slot)?;

            if let Some(nested) = &rule.nested {
                self.evaluate_field_object(&rule.key, slot, nested)?;
            }
        }

        trace!(rules = schema.len(), depth = self.depth, "Schema level passed");
        Ok(())
    }

    fn run_checks(&self, rule: &FieldRule, slot: &mut Value) -> Result<()> {
        for check in &rule.checks {
            if let Err(err) = check.predicate.check_in_place(slot, self) {
                let message = if check.message.is_empty() {
                    err.message
                } else {
                    check.message.clone()
                };
                debug!(field = %rule.key, message = %message, "Field rejected");
                return Err(ValidationError::rejected(&rule.key, message));
            }
        }
        Ok(())
    }

    fn evaluate_field_object(&self, key: &str, slot: &mut Value, schema: &Schema) -> Result<()> {
        match slot {
            Value::Object(map) => self.evaluate_nested(map, schema),
            Value::Record(record) => {
                let mut view = record.object_view();
                self.evaluate_nested(&mut view, schema)
            }
            _ => {
                debug!(field = %key, kind = %slot.kind(), "Nested field is not an object");
                Err(ValidationError::not_an_object(key))
            }
        }
    }
}

fn apply_transforms(rule: &FieldRule, slot: &mut Value) {
    if rule.transforms.is_empty() {
        return;
    }
    let original = mem::take(slot);
    *slot = rule
        .transforms
        .iter()
        .fold(original, |value, transform| transform.apply(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredicateError;
    use crate::predicates::{predicate_fn, IsAlphanumeric, IsEmail, IsNotEmpty, MinLength};
    use crate::schema::FieldRule;
    use crate::transforms::{transform_fn, ToLower, Trim};
    use crate::value::ObjectView;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn object(value: serde_json::Value) -> Object {
        match Value::from(value) {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other.type_name()),
        }
    }

    fn signup_schema() -> Schema {
        Schema::builder()
            .field(
                FieldRule::required("username")
                    .check(IsNotEmpty, "Username is required")
                    .check(IsAlphanumeric, "Username must be alphanumeric"),
            )
            .field(
                FieldRule::required("email")
                    .check(IsNotEmpty, "Email is required")
                    .check(IsEmail, "Invalid email address"),
            )
            .field(
                FieldRule::required("password")
                    .check(IsNotEmpty, "Password is required")
                    .check(MinLength::new(6), "Password must be at least 6 characters"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_input_passes() {
        let mut body = object(json!({
            "username": "user123",
            "email": "user@example.com",
            "password": "password123"
        }));
        assert_eq!(evaluate(&mut body, &signup_schema()), Ok(()));
    }

    #[test]
    fn test_missing_required_field_reports_key() {
        let mut body = object(json!({"username": "user123", "password": "password123"}));
        let err = evaluate(&mut body, &signup_schema()).unwrap_err();
        assert_eq!(err, ValidationError::required("email"));
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_rule_order_decides_first_error() {
        let mut body = object(json!({
            "username": "user@123",
            "email": "invalid-email",
            "password": "pw"
        }));
        let err = evaluate(&mut body, &signup_schema()).unwrap_err();
        assert_eq!(err.to_string(), "Username must be alphanumeric");
    }

    #[test]
    fn test_password_too_short() {
        let mut body = object(json!({
            "username": "user123",
            "email": "user@example.com",
            "password": "pass"
        }));
        let err = evaluate(&mut body, &signup_schema()).unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
        assert_eq!(err.field(), Some("password"));
    }

    #[test]
    fn test_optional_missing_field_is_skipped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = Schema::builder()
            .field(
                FieldRule::optional("nickname")
                    .transform(transform_fn("count", move |v| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        v
                    }))
                    .check(IsNotEmpty, "nickname must not be empty"),
            )
            .build()
            .unwrap();

        let mut body = Object::new();
        assert_eq!(evaluate(&mut body, &schema), Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(body.is_empty());
    }

    #[test]
    fn test_missing_required_field_runs_no_transform() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = Schema::builder()
            .field(FieldRule::required("token").transform(transform_fn("count", move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                v
            })))
            .build()
            .unwrap();

        let mut body = object(json!({"other": 1}));
        let err = evaluate(&mut body, &schema).unwrap_err();
        assert_eq!(err.to_string(), "token is required");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_present_null_counts_as_existing() {
        let schema = Schema::builder()
            .field(FieldRule::optional("note").check(IsNotEmpty, "note must not be empty"))
            .build()
            .unwrap();
        let mut body = object(json!({"note": null}));
        let err = evaluate(&mut body, &schema).unwrap_err();
        assert_eq!(err.to_string(), "note must not be empty");
    }

    #[test]
    fn test_transforms_fold_left_to_right_and_write_back() {
        let schema = Schema::builder()
            .field(FieldRule::required("name").transform(Trim).transform(ToLower))
            .build()
            .unwrap();
        let mut body = object(json!({"name": "  JohnDoe  "}));
        evaluate(&mut body, &schema).unwrap();
        assert_eq!(body["name"], Value::from("johndoe"));
    }

    #[test]
    fn test_predicates_see_transformed_value() {
        let schema = Schema::builder()
            .field(
                FieldRule::required("code")
                    .transform(Trim)
                    .check(IsAlphanumeric, "code must be alphanumeric"),
            )
            .build()
            .unwrap();
        let mut body = object(json!({"code": "  abc123 "}));
        assert_eq!(evaluate(&mut body, &schema), Ok(()));
    }

    #[test]
    fn test_partial_transformation_visible_on_error() {
        let schema = Schema::builder()
            .field(FieldRule::required("email").transform(ToLower))
            .field(FieldRule::required("password"))
            .build()
            .unwrap();
        let mut body = object(json!({"email": "USER@EXAMPLE.COM"}));
        assert!(evaluate(&mut body, &schema).is_err());
        assert_eq!(body["email"], Value::from("user@example.com"));
    }

    #[test]
    fn test_only_first_failing_message_returned() {
        let schema = Schema::builder()
            .field(
                FieldRule::required("name")
                    .check(IsNotEmpty, "A")
                    .check(MinLength::new(3), "B"),
            )
            .build()
            .unwrap();
        let mut body = object(json!({"name": ""}));
        assert_eq!(evaluate(&mut body, &schema).unwrap_err().to_string(), "A");
    }

    #[test]
    fn test_empty_message_surfaces_predicate_error() {
        let schema = Schema::builder()
            .field(FieldRule::required("name").check_with(MinLength::new(3)))
            .build()
            .unwrap();
        let mut body = object(json!({"name": "ab"}));
        assert_eq!(
            evaluate(&mut body, &schema).unwrap_err().to_string(),
            "value must be at least 3 characters long"
        );
    }

    #[test]
    fn test_custom_predicate() {
        let expected = predicate_fn("expected", |value: &Value| match value.as_str() {
            Some("expected") => Ok(()),
            Some(_) => Err(PredicateError::new("Value must be 'expected'")),
            None => Err(PredicateError::not_a_string()),
        });
        let schema = Schema::builder()
            .field(FieldRule::required("v").check_with(expected))
            .build()
            .unwrap();

        let mut body = object(json!({"v": "unexpected"}));
        assert_eq!(
            evaluate(&mut body, &schema).unwrap_err().to_string(),
            "Value must be 'expected'"
        );
        let mut body = object(json!({"v": 123}));
        assert_eq!(
            evaluate(&mut body, &schema).unwrap_err().to_string(),
            "value must be a string"
        );
    }

    fn user_schema() -> Schema {
        let nested = Schema::builder()
            .field(FieldRule::required("name").check(IsNotEmpty, "Name is required"))
            .field(FieldRule::required("age"))
            .build()
            .unwrap();
        Schema::builder()
            .field(
                FieldRule::required("user")
                    .check(IsNotEmpty, "User is required")
                    .nested(nested),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_nested_error_propagates_unwrapped() {
        let mut body = object(json!({"user": {"name": "Jo"}}));
        let err = evaluate(&mut body, &user_schema()).unwrap_err();
        assert_eq!(err.to_string(), "age is required");
    }

    #[test]
    fn test_nested_requires_object() {
        let mut body = object(json!({"user": "Jo"}));
        let err = evaluate(&mut body, &user_schema()).unwrap_err();
        assert_eq!(err, ValidationError::not_an_object("user"));
        assert_eq!(err.to_string(), "user must be an object");
    }

    #[test]
    fn test_nested_predicates_run_before_recursion() {
        let mut body = object(json!({"user": {}}));
        let err = evaluate(&mut body, &user_schema()).unwrap_err();
        assert_eq!(err.to_string(), "User is required");
    }

    #[test]
    fn test_nested_transforms_write_back() {
        let nested = Schema::builder()
            .field(FieldRule::required("city").transform(Trim))
            .build()
            .unwrap();
        let schema = Schema::builder()
            .field(FieldRule::required("address").nested(nested))
            .build()
            .unwrap();
        let mut body = object(json!({"address": {"city": " Oran "}}));
        evaluate(&mut body, &schema).unwrap();
        assert_eq!(body["address"].as_object().unwrap()["city"], Value::from("Oran"));
    }

    #[derive(Debug)]
    struct Profile {
        name: String,
    }

    impl ObjectView for Profile {
        fn object_view(&self) -> Object {
            let mut map = Object::new();
            map.insert("name".to_string(), Value::from(self.name.as_str()));
            map
        }
    }

    #[test]
    fn test_nested_record_is_evaluated_through_its_view() {
        let nested = Schema::builder()
            .field(FieldRule::required("name").check(MinLength::new(3), "name too short"))
            .build()
            .unwrap();
        let schema = Schema::builder()
            .field(FieldRule::required("profile").nested(nested))
            .build()
            .unwrap();

        let mut body = Object::new();
        body.insert("profile".into(), Value::record(Profile { name: "Al".into() }));
        assert_eq!(
            evaluate(&mut body, &schema).unwrap_err().to_string(),
            "name too short"
        );

        body.insert("profile".into(), Value::record(Profile { name: "Alice".into() }));
        assert_eq!(evaluate(&mut body, &schema), Ok(()));
    }

    #[test]
    fn test_depth_limit() {
        let mut schema = Schema::builder()
            .field(FieldRule::required("leaf"))
            .build()
            .unwrap();
        for _ in 0..3 {
            schema = Schema::builder()
                .field(FieldRule::required("child").nested(schema))
                .build()
                .unwrap();
        }
        let mut body = object(json!({"child": {"child": {"child": {"leaf": true}}}}));

        let shallow = Engine::new(EngineConfig::new().with_max_depth(2));
        assert_eq!(
            shallow.evaluate(&mut body, &schema),
            Err(ValidationError::DepthExceeded { limit: 2 })
        );

        let deep_enough = Engine::new(EngineConfig::new().with_max_depth(3));
        assert_eq!(deep_enough.evaluate(&mut body, &schema), Ok(()));
    }

    #[test]
    fn test_schema_is_reusable_across_evaluations() {
        let schema = signup_schema();
        for _ in 0..3 {
            let mut body = object(json!({
                "username": "user123",
                "email": "user@example.com",
                "password": "password123"
            }));
            assert!(evaluate(&mut body, &schema).is_ok());
        }
    }
}

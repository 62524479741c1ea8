//! Extractor for bodies accepted by the validation middleware

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use reqguard_core::{Object, Value};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// The object produced by a successful evaluation, after transforms.
///
/// Handlers behind [`validate_json_body`](crate::validate_json_body)
/// extract it directly. Without the middleware extraction fails with a 500.
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub Object);

impl ValidatedBody {
    pub fn into_inner(self) -> Object {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Decode the validated object into a typed structure
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()).to_json())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ValidatedBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ValidatedBody>()
            .cloned()
            .ok_or(ApiError::MissingValidatedBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Signup {
        username: String,
        age: i64,
    }

    #[test]
    fn test_deserialize_into_struct() {
        let mut object = Object::new();
        object.insert("username".into(), Value::from("user123"));
        object.insert("age".into(), Value::Integer(30));
        let body = ValidatedBody(object);

        assert_eq!(body.get("age"), Some(&Value::Integer(30)));
        let signup: Signup = body.deserialize().unwrap();
        assert_eq!(
            signup,
            Signup {
                username: "user123".into(),
                age: 30
            }
        );
    }
}

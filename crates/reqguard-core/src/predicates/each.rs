//! Quantifier combinators over arrays
//!
//! Both combinators stop at the first failing element and report its index.
//! When run by the engine they work on the stored array, so transforms made
//! by an element schema are visible in the evaluated object.

use super::{Predicate, PredicateResult};
use crate::engine::{Engine, Scope};
use crate::error::PredicateError;
use crate::schema::Schema;
use crate::value::Value;

/// Apply a predicate to every element of an array
#[derive(Debug)]
pub struct Each {
    pub predicate: Box<dyn Predicate>,
}

impl Each {
    pub fn new<P: Predicate + 'static>(predicate: P) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Predicate for Each {
    fn check(&self, value: &Value) -> PredicateResult {
        let mut owned = value.clone();
        let engine = Engine::default();
        self.check_in_place(&mut owned, &Scope::root(&engine))
    }

    fn check_in_place(&self, value: &mut Value, scope: &Scope<'_>) -> PredicateResult {
        let Value::Array(items) = value else {
            return Err(PredicateError::new("value must be a slice or array"));
        };
        for (index, item) in items.iter_mut().enumerate() {
            self.predicate
                .check_in_place(item, scope)
                .map_err(|err| PredicateError::at_index(index, err))?;
        }
        Ok(())
    }
}

/// Evaluate every element of an array against a schema.
///
/// Elements must be objects or records. Records are evaluated through their
/// exported view, so their transforms are not written back.
#[derive(Debug, Clone)]
pub struct EachWithOptions {
    pub schema: Schema,
}

impl EachWithOptions {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }
}

impl Predicate for EachWithOptions {
    fn check(&self, value: &Value) -> PredicateResult {
        let mut owned = value.clone();
        let engine = Engine::default();
        self.check_in_place(&mut owned, &Scope::root(&engine))
    }

    fn check_in_place(&self, value: &mut Value, scope: &Scope<'_>) -> PredicateResult {
        let items = match value {
            Value::Array(items) => items,
            Value::Null => {
                return Err(PredicateError::new("value must be a non-nil slice or array"));
            }
            other => {
                return Err(PredicateError::new(format!(
                    "value must be a slice or array, got {}",
                    other.kind()
                )));
            }
        };

        for (index, item) in items.iter_mut().enumerate() {
            let outcome = match item {
                Value::Object(map) => scope.evaluate_nested(map, &self.schema),
                Value::Record(record) => {
                    let mut view = record.object_view();
                    scope.evaluate_nested(&mut view, &self.schema)
                }
                other => {
                    return Err(PredicateError::new(format!(
                        "element at index {} must be an object, got {}",
                        index,
                        other.kind()
                    )));
                }
            };
            outcome.map_err(|err| PredicateError::at_index(index, err))?;
        }
        Ok(())
    }
}

//! Length and numeric bound predicates
//!
//! Lengths count characters, not bytes. Numeric bounds compare integers and
//! floats after widening to f64.

use super::{expect_str, Predicate, PredicateResult};
use crate::error::PredicateError;
use crate::value::Value;

fn char_count(value: &Value) -> Result<usize, PredicateError> {
    expect_str(value).map(|s| s.chars().count())
}

fn number(value: &Value) -> Result<f64, PredicateError> {
    value
        .as_f64()
        .ok_or_else(|| PredicateError::new("value must be a number"))
}

/// At least `min` characters
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    pub min: usize,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Predicate for MinLength {
    fn check(&self, value: &Value) -> PredicateResult {
        if char_count(value)? < self.min {
            return Err(PredicateError::new(format!(
                "value must be at least {} characters long",
                self.min
            )));
        }
        Ok(())
    }
}

/// At most `max` characters
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    pub max: usize,
}

impl MaxLength {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Predicate for MaxLength {
    fn check(&self, value: &Value) -> PredicateResult {
        if char_count(value)? > self.max {
            return Err(PredicateError::new(format!(
                "value must be at most {} characters long",
                self.max
            )));
        }
        Ok(())
    }
}

/// Between `min` and `max` characters, inclusive
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: usize,
    pub max: usize,
}

impl Length {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Predicate for Length {
    fn check(&self, value: &Value) -> PredicateResult {
        let len = char_count(value)?;
        if len < self.min || len > self.max {
            return Err(PredicateError::new(format!(
                "value must be between {} and {} characters long",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Numeric lower bound, inclusive
#[derive(Debug, Clone, Copy)]
pub struct Min {
    pub min: f64,
}

impl Min {
    pub fn new(min: impl Into<f64>) -> Self {
        Self { min: min.into() }
    }
}

impl Predicate for Min {
    fn check(&self, value: &Value) -> PredicateResult {
        if number(value)? < self.min {
            return Err(PredicateError::new(format!(
                "value must be greater than or equal to {}",
                self.min
            )));
        }
        Ok(())
    }
}

/// Numeric upper bound, inclusive
#[derive(Debug, Clone, Copy)]
pub struct Max {
    pub max: f64,
}

impl Max {
    pub fn new(max: impl Into<f64>) -> Self {
        Self { max: max.into() }
    }
}

impl Predicate for Max {
    fn check(&self, value: &Value) -> PredicateResult {
        if number(value)? > self.max {
            return Err(PredicateError::new(format!(
                "value must be less than or equal to {}",
                self.max
            )));
        }
        Ok(())
    }
}

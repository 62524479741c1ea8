use super::{map_strings, Transform};
use crate::value::Value;

/// Strip leading and trailing whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

impl Transform for Trim {
    fn apply(&self, value: Value) -> Value {
        map_strings(value, |s| s.trim().to_string())
    }
}

/// Keep ASCII letters, digits and spaces only
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveSpecialChars;

impl Transform for RemoveSpecialChars {
    fn apply(&self, value: Value) -> Value {
        map_strings(value, |s| {
            s.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
                .collect()
        })
    }
}

/// Cut strings to at most `max_chars` characters
#[derive(Debug, Clone, Copy)]
pub struct Truncate {
    pub max_chars: usize,
}

impl Truncate {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Transform for Truncate {
    fn apply(&self, value: Value) -> Value {
        map_strings(value, |mut s| {
            if let Some((cut, _)) = s.char_indices().nth(self.max_chars) {
                s.truncate(cut);
            }
            s
        })
    }
}

/// Replace every occurrence of `from` with `to`
#[derive(Debug, Clone)]
pub struct Replace {
    pub from: String,
    pub to: String,
}

impl Replace {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Transform for Replace {
    fn apply(&self, value: Value) -> Value {
        if self.from.is_empty() {
            return value;
        }
        map_strings(value, |s| s.replace(&self.from, &self.to))
    }
}

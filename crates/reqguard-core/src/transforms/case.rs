//! Case transforms

use super::{map_strings, Transform};
use crate::value::Value;

/// Lowercase strings
#[derive(Debug, Clone, Copy, Default)]
pub struct ToLower;

impl Transform for ToLower {
    fn apply(&self, value: Value) -> Value {
        map_strings(value, |s| s.to_lowercase())
    }
}

/// Uppercase strings
#[derive(Debug, Clone, Copy, Default)]
pub struct ToUpper;

impl Transform for ToUpper {
    fn apply(&self, value: Value) -> Value {
        map_strings(value, |s| s.to_uppercase())
    }
}

/// Casing rules used by [`TitleCase`].
///
/// `Neutral` applies plain Unicode case mapping. `Turkish` maps the dotted
/// and dotless i pairs. `Dutch` capitalises a leading `ij` as `IJ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleLocale {
    #[default]
    Neutral,
    Turkish,
    Dutch,
}

impl TitleLocale {
    fn push_lower(&self, c: char, out: &mut String) {
        match (self, c) {
            (TitleLocale::Turkish, 'I') => out.push('ı'),
            (TitleLocale::Turkish, 'İ') => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }

    fn push_upper(&self, c: char, out: &mut String) {
        match (self, c) {
            (TitleLocale::Turkish, 'i') => out.push('İ'),
            (TitleLocale::Turkish, 'ı') => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
}

/// Capitalise the first letter of every word and lowercase the rest.
///
/// A word is a run of letters, digits and apostrophes, so `o'neil` becomes
/// `O'neil`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCase {
    pub locale: TitleLocale,
}

impl TitleCase {
    pub fn new(locale: TitleLocale) -> Self {
        Self { locale }
    }

    fn title(&self, s: &str) -> String {
        let mut lowered = String::with_capacity(s.len());
        for c in s.chars() {
            self.locale.push_lower(c, &mut lowered);
        }

        let mut out = String::with_capacity(lowered.len());
        let mut chars = lowered.chars().peekable();
        let mut in_word = false;
        while let Some(c) = chars.next() {
            if !is_word_char(c) {
                in_word = false;
                out.push(c);
                continue;
            }
            if in_word {
                out.push(c);
                continue;
            }
            in_word = true;
            self.locale.push_upper(c, &mut out);
            if self.locale == TitleLocale::Dutch && c == 'i' && chars.peek() == Some(&'j') {
                chars.next();
                out.push('J');
            }
        }
        out
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '\u{2019}'
}

impl Transform for TitleCase {
    fn apply(&self, value: Value) -> Value {
        map_strings(value, |s| self.title(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn title(locale: TitleLocale, s: &str) -> Value {
        TitleCase::new(locale).apply(Value::from(s))
    }

    #[test]
    fn test_case_transforms() {
        assert_eq!(ToLower.apply(Value::from("HeLLo")), Value::from("hello"));
        assert_eq!(ToUpper.apply(Value::from("HeLLo")), Value::from("HELLO"));
        assert_eq!(ToLower.apply(Value::Integer(5)), Value::Integer(5));
        assert_eq!(
            ToUpper.apply(Value::from(json!(["a", 1, "b"]))),
            Value::from(json!(["A", 1, "B"]))
        );
    }

    #[test]
    fn test_title_case_neutral() {
        assert_eq!(title(TitleLocale::Neutral, "hello WORLD"), Value::from("Hello World"));
        assert_eq!(title(TitleLocale::Neutral, "o'neil-smith"), Value::from("O'neil-Smith"));
        assert_eq!(title(TitleLocale::Neutral, "élan vital"), Value::from("Élan Vital"));
        assert_eq!(title(TitleLocale::Neutral, "  two  spaces "), Value::from("  Two  Spaces "));
        assert_eq!(title(TitleLocale::Neutral, "1st place"), Value::from("1st Place"));
    }

    #[test]
    fn test_title_case_turkish() {
        assert_eq!(title(TitleLocale::Turkish, "istanbul"), Value::from("İstanbul"));
        assert_eq!(title(TitleLocale::Turkish, "IŞIK"), Value::from("Işık"));
        assert_eq!(title(TitleLocale::Neutral, "istanbul"), Value::from("Istanbul"));
    }

    #[test]
    fn test_title_case_dutch() {
        assert_eq!(title(TitleLocale::Dutch, "ijsselmeer"), Value::from("IJsselmeer"));
        assert_eq!(title(TitleLocale::Neutral, "ijsselmeer"), Value::from("Ijsselmeer"));
    }

    #[test]
    fn test_title_case_is_idempotent() {
        let once = title(TitleLocale::Neutral, "the QUICK brown fox");
        let twice = TitleCase::default().apply(once.clone());
        assert_eq!(once, twice);
    }
}

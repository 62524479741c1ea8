//! String format predicates
//!
//! Every predicate here requires a string and fails with
//! `value must be a string` otherwise.

use std::net::IpAddr;
use std::sync::LazyLock;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use chrono::NaiveDate;
use regex::Regex;

use super::{expect_str, Predicate, PredicateResult};
use crate::error::{PredicateError, SchemaError};
use crate::value::Value;

static ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("alpha regex should compile"));

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid regex should compile")
});

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex should compile"));

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})$").expect("time regex should compile")
});

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color regex should compile")
});

static ARABIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Arabic}\s]+$").expect("arabic regex should compile"));

static ALPHA_ARABIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Arabic}\p{Latin}\s]+$").expect("alpha-arabic regex should compile")
});

/// Padded standard alphabet that tolerates non-zero trailing bits
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode Base64, skipping line breaks as MIME-wrapped payloads carry them
pub(super) fn decode_base64(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if input.contains(['\r', '\n']) {
        let joined: String = input.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        LENIENT_BASE64.decode(joined)
    } else {
        LENIENT_BASE64.decode(input)
    }
}

/// Run a string test and map a negative answer to a fixed message
fn string_check(value: &Value, message: &str, test: impl FnOnce(&str) -> bool) -> PredicateResult {
    let s = expect_str(value)?;
    if test(s) {
        Ok(())
    } else {
        Err(PredicateError::new(message))
    }
}

/// ASCII letters and digits only, scanned character by character.
///
/// The empty string passes; pair with [`IsNotEmpty`](super::IsNotEmpty)
/// when a value is mandatory.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAlphanumeric;

impl Predicate for IsAlphanumeric {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value contains invalid characters", |s| {
            s.chars().all(|c| c.is_ascii_alphanumeric())
        })
    }
}

/// One or more ASCII letters
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAlpha;

impl Predicate for IsAlpha {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value must contain only alphabetic characters", |s| {
            ALPHA.is_match(s)
        })
    }
}

/// An RFC 5322 mailbox: `local@domain` or `Display Name <local@domain>`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsEmail;

impl Predicate for IsEmail {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not a valid email address", mailbox::is_valid)
    }
}

/// An absolute URI with a scheme
#[derive(Debug, Clone, Copy, Default)]
pub struct IsUrl;

impl Predicate for IsUrl {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not a valid URL", |s| url::Url::parse(s).is_ok())
    }
}

/// Canonical 8-4-4-4-12 hexadecimal UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct IsUuid;

impl Predicate for IsUuid {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not a valid UUID", |s| UUID.is_match(s))
    }
}

/// A calendar date written `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsDate;

impl Predicate for IsDate {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(
            value,
            "value is not a valid date (expected format: YYYY-MM-DD)",
            |s| DATE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
        )
    }
}

/// A 24-hour clock time written `HH:MM:SS`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsTime;

impl Predicate for IsTime {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(
            value,
            "value is not a valid time (expected format: HH:MM:SS)",
            valid_time,
        )
    }
}

fn valid_time(s: &str) -> bool {
    let Some(caps) = TIME.captures(s) else {
        return false;
    };
    let field = |i: usize| caps[i].parse::<u32>().unwrap_or(u32::MAX);
    field(1) < 24 && field(2) < 60 && field(3) < 60
}

/// `#RGB` or `#RRGGBB`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsHexColor;

impl Predicate for IsHexColor {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not a valid hexadecimal color code", |s| {
            HEX_COLOR.is_match(s)
        })
    }
}

/// A string holding any JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct IsJson;

impl Predicate for IsJson {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not valid JSON", |s| {
            serde_json::from_str::<serde_json::Value>(s).is_ok()
        })
    }
}

/// An IPv4 or IPv6 literal
#[derive(Debug, Clone, Copy, Default)]
pub struct IsIp;

impl Predicate for IsIp {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not a valid IP address", |s| {
            s.parse::<IpAddr>().is_ok()
        })
    }
}

/// Padded standard-alphabet Base64.
///
/// Line breaks are ignored and unused trailing bits need not be zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsBase64;

impl Predicate for IsBase64 {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not valid Base64", |s| decode_base64(s).is_ok())
    }
}

/// Arabic script and whitespace only
#[derive(Debug, Clone, Copy, Default)]
pub struct IsArabic;

impl Predicate for IsArabic {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value must contain only Arabic characters", |s| {
            ARABIC.is_match(s)
        })
    }
}

/// Arabic script, Latin script and whitespace only
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAlphaArabic;

impl Predicate for IsAlphaArabic {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(
            value,
            "value must contain only Arabic and Latin alphabetic characters",
            |s| ALPHA_ARABIC.is_match(s),
        )
    }
}

/// A card number passing the Luhn checksum.
///
/// Spaces and dashes are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsCreditCard;

impl Predicate for IsCreditCard {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value is not a valid credit card number", |s| {
            let digits: String = s.chars().filter(|c| *c != ' ' && *c != '-').collect();
            luhn_valid(&digits)
        })
    }
}

/// Luhn checksum over a non-empty string of ASCII digits
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}

/// Matches a caller-supplied regular expression
#[derive(Debug, Clone)]
pub struct Matches {
    pub regex: Regex,
}

impl Matches {
    /// Compile the pattern; an invalid pattern is a schema error
    pub fn new(pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }
}

impl Predicate for Matches {
    fn check(&self, value: &Value) -> PredicateResult {
        string_check(value, "value does not match the required pattern", |s| {
            self.regex.is_match(s)
        })
    }
}

/// RFC 5322 mailbox parsing, without comments or folding whitespace.
mod mailbox {
    pub(super) fn is_valid(input: &str) -> bool {
        let s = input.trim();
        if s.is_empty() {
            return false;
        }
        match angle_start(s) {
            Some(open) => {
                let Some(addr) = s[open + 1..].strip_suffix('>') else {
                    return false;
                };
                is_display_name(s[..open].trim()) && is_addr_spec(addr)
            }
            None => is_addr_spec(s),
        }
    }

    /// Position of the first `<` outside a quoted string
    fn angle_start(s: &str) -> Option<usize> {
        let mut quoted = false;
        let mut escaped = false;
        for (i, c) in s.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' if quoted => escaped = true,
                '"' => quoted = !quoted,
                '<' if !quoted => return Some(i),
                _ => {}
            }
        }
        None
    }

    fn is_atext(c: char) -> bool {
        c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c) || !c.is_ascii()
    }

    fn is_dot_atom(s: &str) -> bool {
        !s.is_empty() && s.split('.').all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
    }

    /// Length of a leading quoted string, quotes included
    fn quoted_len(s: &str) -> Option<usize> {
        let mut chars = s.char_indices();
        if !matches!(chars.next(), Some((_, '"'))) {
            return None;
        }
        let mut escaped = false;
        for (i, c) in chars {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => return Some(i + 1),
                c if c.is_control() && c != '\t' => return None,
                _ => {}
            }
        }
        None
    }

    fn is_addr_spec(s: &str) -> bool {
        let (local_ok, domain) = if s.starts_with('"') {
            match quoted_len(s) {
                Some(len) if len > 2 => (true, s[len..].strip_prefix('@')),
                _ => (false, None),
            }
        } else {
            match s.rsplit_once('@') {
                Some((local, domain)) => (is_dot_atom(local), Some(domain)),
                None => (false, None),
            }
        };
        match domain {
            Some(domain) if local_ok => is_domain(domain),
            _ => false,
        }
    }

    fn is_domain(s: &str) -> bool {
        if let Some(literal) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            return literal
                .chars()
                .all(|c| c.is_ascii_graphic() && !matches!(c, '[' | ']' | '\\'));
        }
        is_dot_atom(s)
    }

    fn is_display_name(s: &str) -> bool {
        let mut rest = s;
        while !rest.is_empty() {
            if rest.starts_with('"') {
                let Some(len) = quoted_len(rest) else {
                    return false;
                };
                rest = &rest[len..];
            } else {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '"')
                    .unwrap_or(rest.len());
                let word = &rest[..end];
                if !word.chars().all(|c| is_atext(c) || c == '.') {
                    return false;
                }
                rest = &rest[end..];
            }
            rest = rest.trim_start();
        }
        true
    }
}

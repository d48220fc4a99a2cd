//! Loose scalar conversion for parameter text.
//!
//! Parameter blocks carry every scalar as a string. Numeric fields are read
//! the way the host's loose `Number()` conversion reads them: surrounding
//! whitespace is ignored, blank text is `0`, and anything unparsable is `NaN`.
//! What a field does with `NaN` is decided per field by the caller.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Convert parameter text to a number with loose host semantics.
///
/// - `""` and whitespace-only text => `0.0`
/// - decimal and exponent notation => the parsed value
/// - `0x`/`0o`/`0b` prefixed integers => the parsed value
/// - `Infinity`, `+Infinity`, `-Infinity` => the matching infinity
/// - anything else => `NaN`
pub fn to_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(text) {
        return value;
    }

    // Rust accepts "inf"/"nan" spellings the host does not.
    let numeric_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric_chars {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let lower = text.get(..2)?.to_ascii_lowercase();
    let radix = match lower.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    Some(
        u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
    )
}

/// Integer view of [`to_number`] where `NaN` and infinities collapse to `0`.
///
/// Fractional values are truncated toward zero.
pub fn int_or_zero(raw: &str) -> i64 {
    let n = to_number(raw);
    if n.is_finite() {
        n.trunc() as i64
    } else {
        0
    }
}

/// Boolean parameter: only the literal `"true"` is truthy.
pub fn is_true(raw: &str) -> bool {
    raw == "true"
}

/// Deserialize a record field as text, accepting the scalar JSON types an
/// editor might emit unquoted. `null` reads as the empty string.
pub fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

/// A record that only decodes from a JSON object.
///
/// Derived struct visitors also accept a sequence and fill fields by
/// position, so `[]` would decode as an all-default record. Parameter
/// records are always objects; anything else is malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Object<T>(pub T);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Object<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        T::deserialize(Value::Object(map))
            .map(Object)
            .map_err(D::Error::custom)
    }
}

//! Value coercion helpers
//!
//! Field values are plain [`serde_json::Value`]s. Constraints look at them
//! through the helpers here: a text form for string-based checks, and a
//! coercive equality used by `compare`, `in`, `unique` and `ext`.

use serde_json::Value;
use std::borrow::Cow;

/// Text form of a scalar value.
///
/// Lists, objects and null have no text form.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Length used by the `length` constraint.
///
/// Characters for strings and numbers, element count for collections.
/// Booleans measure as `"1"` and `""`.
pub fn measure(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Bool(b) => usize::from(*b),
        Value::Null => 0,
        other => as_text(other).map(|s| s.chars().count()).unwrap_or(0),
    }
}

/// Render a value for message placeholders.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
        other => as_text(other).map(Cow::into_owned).unwrap_or_default(),
    }
}

/// Truthiness under coercive comparison.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Parse a numeric string (`"42"`, `" 1.5"`, `"1e3"`).
///
/// Surrounding whitespace is allowed; `inf`, `nan` and hex forms are not.
pub fn numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Coercive equality.
///
/// - numbers and numeric strings compare numerically
/// - booleans compare against the other side's truthiness
/// - null equals `""` and anything falsy
/// - lists compare element-wise, objects key-wise
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == truthy(other),
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !truthy(other),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match numeric(s) {
                Some(parsed) => n.as_f64() == Some(parsed),
                None => n.to_string() == *s,
            }
        }
        (Value::String(x), Value::String(y)) => match (numeric(x), numeric(y)) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, xv)| y.get(key).is_some_and(|yv| loose_eq(xv, yv)))
        }
        _ => false,
    }
}

/// Coercive membership test.
pub fn contains_loose(list: &[Value], needle: &Value) -> bool {
    list.iter().any(|item| loose_eq(item, needle))
}

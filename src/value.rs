//! Helpers for inspecting raw field values.
//!
//! Field values are plain [`serde_json::Value`]s. Validators only ever read
//! them; these helpers centralise the coercions every validator agrees on:
//! what counts as "empty", how a value reads as text, and how a value reads as
//! a number.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Leading numeric prefix accepted by [`parse_number`], e.g. `"12.5kg"` -> `12.5`.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Returns true when a value counts as "no input".
///
/// `null`, the empty string and the empty array are empty. Every validator
/// except `required` and `requiredCheckboxGroup` passes empty input.
///
/// # Example
///
/// ```rust
/// use fieldguard::value::is_empty_input;
/// use serde_json::json;
///
/// assert!(is_empty_input(&json!(null)));
/// assert!(is_empty_input(&json!("")));
/// assert!(!is_empty_input(&json!(0)));
/// ```
pub fn is_empty_input(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Returns the textual form of a scalar value.
///
/// Strings are borrowed, numbers and booleans are rendered. Arrays, objects
/// and `null` have no textual form.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads a value as a number.
///
/// Numbers are taken as-is. Strings are read by their leading numeric prefix
/// after leading whitespace, so `" 42px"` reads as `42`. Anything else, or a
/// string with no numeric prefix, yields `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_prefix(s),
        _ => None,
    }
}

fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let prefix = NUMERIC_PREFIX.find(trimmed)?.as_str();
    match prefix {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        digits => digits.parse().ok(),
    }
}

/// Formats a number for display, dropping a zero fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}

/// Converts a number to JSON, emitting an integer when it has no fraction.
pub fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Renders any value as display text; strings are shown without quotes.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

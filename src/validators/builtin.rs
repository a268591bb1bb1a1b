//! Baseline validators: presence, length, numeric bounds and patterns.
//!
//! These are the checks every form framework ships with. Their error kinds
//! rank first in message resolution.

use regex::Regex;
use serde_json::Value;

use crate::error::{ErrorKind, ErrorPayload, ValidationErrors};
use crate::value::{as_text, is_empty_input, parse_number};
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// A baseline validator.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let ctx = FieldContext::detached();
/// let min_len = Validators::min_length(5);
///
/// let errors = min_len.errors(&json!("ab"), &ctx).unwrap();
/// assert_eq!(errors.to_json(), json!({"minlength": {"requiredLength": 5, "actualLength": 2}}));
/// ```
#[derive(Debug, Clone)]
pub enum BuiltinValidator {
    /// Fails on empty input.
    Required,
    /// Fails when a string or array is shorter than the bound.
    MinLength(usize),
    /// Fails when a string or array is longer than the bound.
    MaxLength(usize),
    /// Fails when a numeric value is below the bound.
    Min(f64),
    /// Fails when a numeric value is above the bound.
    Max(f64),
    /// Fails when the text does not match the whole pattern.
    Pattern { regex: Regex, source: String },
}

impl BuiltinValidator {
    /// Compiles a pattern validator.
    ///
    /// The pattern must match the entire value; `^` and `$` anchors are added
    /// when missing.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let mut source = String::with_capacity(pattern.len() + 2);
        if !pattern.starts_with('^') {
            source.push('^');
        }
        source.push_str(pattern);
        if !pattern.ends_with('$') {
            source.push('$');
        }
        let regex = Regex::new(&source)?;
        Ok(BuiltinValidator::Pattern { regex, source })
    }

    fn failure(&self, value: &Value) -> Option<ValidationErrors> {
        match self {
            BuiltinValidator::Required => {
                is_empty_input(value).then(|| ValidationErrors::flag(ErrorKind::Required))
            }
            BuiltinValidator::MinLength(min) => {
                if is_empty_input(value) {
                    return None;
                }
                let len = length_of(value)?;
                (len < *min).then(|| {
                    ValidationErrors::single(
                        ErrorKind::MinLength,
                        ErrorPayload::Length {
                            required_length: *min,
                            actual_length: len,
                        },
                    )
                })
            }
            BuiltinValidator::MaxLength(max) => {
                let len = length_of(value)?;
                (len > *max).then(|| {
                    ValidationErrors::single(
                        ErrorKind::MaxLength,
                        ErrorPayload::Length {
                            required_length: *max,
                            actual_length: len,
                        },
                    )
                })
            }
            BuiltinValidator::Min(min) => {
                if is_empty_input(value) {
                    return None;
                }
                let actual = parse_number(value)?;
                (actual < *min).then(|| {
                    ValidationErrors::single(ErrorKind::Min, ErrorPayload::Min { min: *min, actual })
                })
            }
            BuiltinValidator::Max(max) => {
                if is_empty_input(value) {
                    return None;
                }
                let actual = parse_number(value)?;
                (actual > *max).then(|| {
                    ValidationErrors::single(ErrorKind::Max, ErrorPayload::Max { max: *max, actual })
                })
            }
            BuiltinValidator::Pattern { regex, source } => {
                if is_empty_input(value) {
                    return None;
                }
                let text = as_text(value).unwrap_or_default();
                (!regex.is_match(&text)).then(|| {
                    ValidationErrors::single(
                        ErrorKind::Pattern,
                        ErrorPayload::Pattern {
                            required_pattern: source.clone(),
                            actual_value: text.into_owned(),
                        },
                    )
                })
            }
        }
    }
}

impl Validator for BuiltinValidator {
    fn validate(&self, value: &Value, _ctx: &FieldContext<'_>) -> ValidationResult<()> {
        check(self.failure(value))
    }
}

/// Length of a string (in characters) or array; other values have none.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

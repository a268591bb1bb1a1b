//! Inclusive numeric range validation.

use serde_json::Value;

use crate::error::{ErrorKind, ErrorPayload, RangeActual, ValidationErrors};
use crate::value::{is_empty_input, parse_number};
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// Requires a numeric value within `[min, max]`.
///
/// Numbers are checked directly and strings by their leading numeric prefix.
/// Zero is an ordinary value and is checked against the range, while an
/// unchecked `false` counts as no input. A value that cannot be read as a
/// number fails with the raw value as `actual`.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let ctx = FieldContext::detached();
/// let range = Validators::range(1.0, 10.0);
///
/// assert!(range.errors(&json!(5), &ctx).is_none());
/// assert_eq!(
///     range.errors(&json!(15), &ctx).unwrap().to_json(),
///     json!({"range": {"min": 1, "max": 10, "actual": 15}})
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValidator {
    min: f64,
    max: f64,
}

impl RangeValidator {
    /// Creates a range validator with inclusive bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    fn failure(&self, actual: RangeActual) -> ValidationErrors {
        ValidationErrors::single(
            ErrorKind::Range,
            ErrorPayload::Range {
                min: self.min,
                max: self.max,
                actual,
            },
        )
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &Value, _ctx: &FieldContext<'_>) -> ValidationResult<()> {
        if is_empty_input(value) || *value == Value::Bool(false) {
            return check(None);
        }
        let failure = match parse_number(value) {
            None => Some(self.failure(RangeActual::Raw(value.clone()))),
            Some(n) if n < self.min || n > self.max => Some(self.failure(RangeActual::Parsed(n))),
            Some(_) => None,
        };
        check(failure)
    }
}

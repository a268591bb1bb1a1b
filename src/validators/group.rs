//! Checkbox group validation.

use serde_json::Value;

use crate::error::{ErrorKind, ErrorPayload, ValidationErrors};
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// Requires at least `min_required` checked boxes in a group.
///
/// The group value is a map from option name to `bool` (an array of `bool`s
/// is also accepted). Only entries that are exactly `true` count. A missing
/// group (`null` or `""`) fails without an `actual` count.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let ctx = FieldContext::detached();
/// let group = Validators::required_checkbox_group(2);
///
/// assert!(group.errors(&json!({"a": true, "b": true, "c": false}), &ctx).is_none());
/// assert_eq!(
///     group.errors(&json!({"a": true, "b": false}), &ctx).unwrap().to_json(),
///     json!({"requiredCheckboxGroup": {"minRequired": 2, "actual": 1}})
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredCheckboxGroup {
    min_required: usize,
}

impl RequiredCheckboxGroup {
    /// Creates a group validator requiring `min_required` checked entries.
    pub fn new(min_required: usize) -> Self {
        Self { min_required }
    }

    /// Returns the number of entries that must be checked.
    pub fn min_required(&self) -> usize {
        self.min_required
    }

    fn failure(&self, actual: Option<usize>) -> ValidationErrors {
        ValidationErrors::single(
            ErrorKind::RequiredCheckboxGroup,
            ErrorPayload::CheckboxGroup {
                min_required: self.min_required,
                actual,
            },
        )
    }
}

impl Default for RequiredCheckboxGroup {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Validator for RequiredCheckboxGroup {
    fn validate(&self, value: &Value, _ctx: &FieldContext<'_>) -> ValidationResult<()> {
        let checked = match value {
            Value::Null => return check(Some(self.failure(None))),
            Value::String(s) if s.is_empty() => return check(Some(self.failure(None))),
            Value::Object(entries) => entries.values().filter(|v| **v == Value::Bool(true)).count(),
            Value::Array(items) => items.iter().filter(|v| **v == Value::Bool(true)).count(),
            _ => 0,
        };
        check((checked < self.min_required).then(|| self.failure(Some(checked))))
    }
}

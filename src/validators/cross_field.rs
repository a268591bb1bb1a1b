//! Cross-field validation.

use serde_json::Value;

use crate::error::{ErrorKind, ErrorPayload, ValidationErrors};
use crate::value::is_empty_input;
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// Requires a value equal to a named sibling field's value.
///
/// Typical use is a "confirm password" field. Outside a form, or when the
/// sibling does not exist, there is nothing to compare against and the check
/// passes. An empty value also passes; pair with `required` to demand one.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let form = json!({"password": "S3cret!pw"});
/// let ctx = FieldContext::with_siblings(form.as_object().unwrap());
/// let confirm = Validators::match_control("password");
///
/// assert!(confirm.errors(&json!("S3cret!pw"), &ctx).is_none());
/// assert_eq!(
///     confirm.errors(&json!("other"), &ctx).unwrap().to_json(),
///     json!({"matchControl": {"controlName": "password"}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchControl {
    control_name: String,
}

impl MatchControl {
    /// Creates a validator comparing against the named sibling.
    pub fn new(control_name: impl Into<String>) -> Self {
        Self {
            control_name: control_name.into(),
        }
    }

    /// Returns the sibling this validator compares against.
    pub fn control_name(&self) -> &str {
        &self.control_name
    }
}

impl Validator for MatchControl {
    fn validate(&self, value: &Value, ctx: &FieldContext<'_>) -> ValidationResult<()> {
        if is_empty_input(value) {
            return check(None);
        }
        let Some(other) = ctx.sibling(&self.control_name) else {
            return check(None);
        };
        check((value != other).then(|| {
            ValidationErrors::single(
                ErrorKind::MatchControl,
                ErrorPayload::Control {
                    control_name: self.control_name.clone(),
                },
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detached_is_noop() {
        let validator = MatchControl::new("password");
        assert!(validator
            .errors(&json!("anything"), &FieldContext::detached())
            .is_none());
    }

    #[test]
    fn test_missing_sibling_is_noop() {
        let form = json!({"email": "a@example.com"});
        let ctx = FieldContext::with_siblings(form.as_object().unwrap());
        let validator = MatchControl::new("password");
        assert!(validator.errors(&json!("anything"), &ctx).is_none());
    }

    #[test]
    fn test_compares_structurally() {
        let form = json!({"tags": {"a": true}, "count": 3});
        let ctx = FieldContext::with_siblings(form.as_object().unwrap());

        assert!(MatchControl::new("tags")
            .errors(&json!({"a": true}), &ctx)
            .is_none());
        assert!(MatchControl::new("count").errors(&json!("3"), &ctx).is_some());
    }

    #[test]
    fn test_empty_value_passes() {
        let form = json!({"password": "abc"});
        let ctx = FieldContext::with_siblings(form.as_object().unwrap());
        assert!(MatchControl::new("password").errors(&json!(""), &ctx).is_none());
        assert!(MatchControl::new("password").errors(&json!(null), &ctx).is_none());
    }
}

//! Strong password validation.

use serde_json::Value;

use crate::error::{ErrorKind, ErrorPayload, PasswordIssues, ValidationErrors};
use crate::value::{as_text, is_empty_input};
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks a password against five rules and reports every unmet one.
///
/// The rules are: at least 8 characters, an ASCII uppercase letter, an ASCII
/// lowercase letter, an ASCII digit, and one of [`SPECIAL_CHARS`]. The
/// failure payload is an [`ErrorPayload::Password`] with one flag per unmet
/// rule; a password meeting all rules passes.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let ctx = FieldContext::detached();
/// let strong = Validators::strong_password();
///
/// assert!(strong.errors(&json!("StrongP@ss1"), &ctx).is_none());
///
/// let errors = strong.errors(&json!("StrongPass1"), &ctx).unwrap();
/// assert_eq!(errors.to_json(), json!({"strongPassword": {"specialChar": true}}));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrongPassword;

impl StrongPassword {
    /// Returns the rules `password` violates.
    pub fn issues(password: &str) -> PasswordIssues {
        PasswordIssues {
            min_length: password.chars().count() < MIN_PASSWORD_LENGTH,
            uppercase: !password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: !password.chars().any(|c| c.is_ascii_lowercase()),
            number: !password.chars().any(|c| c.is_ascii_digit()),
            special_char: !password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }
}

impl Validator for StrongPassword {
    fn validate(&self, value: &Value, _ctx: &FieldContext<'_>) -> ValidationResult<()> {
        if is_empty_input(value) {
            return check(None);
        }
        let issues = match as_text(value) {
            Some(text) => Self::issues(&text),
            None => Self::issues(""),
        };
        check((!issues.is_empty()).then(|| {
            ValidationErrors::single(ErrorKind::StrongPassword, ErrorPayload::Password(issues))
        }))
    }
}

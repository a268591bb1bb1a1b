//! The validator catalog.
//!
//! This module provides every validator the crate ships with, plus the
//! [`Validators`] entry point that builds them. Validators are pure: they read
//! a value (and, for cross-field checks, sibling values) and report failures
//! without touching any state.
//!
//! # Example
//!
//! ```rust
//! use fieldguard::{FieldContext, Validator, Validators};
//! use serde_json::json;
//!
//! let ctx = FieldContext::detached();
//!
//! assert!(Validators::credit_card().errors(&json!("4532015112830366"), &ctx).is_none());
//! assert!(Validators::credit_card().errors(&json!("1234567890123456"), &ctx).is_some());
//! ```

mod builtin;
mod combinators;
mod cross_field;
mod date;
mod format;
mod group;
mod numeric;
mod password;
mod traits;

pub use builtin::BuiltinValidator;
pub use combinators::{Compose, CustomValidator};
pub use cross_field::MatchControl;
pub use date::{age_on, MinAge};
pub use format::{luhn_checksum_valid, FormatValidator};
pub use group::RequiredCheckboxGroup;
pub use numeric::RangeValidator;
pub use password::{StrongPassword, MIN_PASSWORD_LENGTH, SPECIAL_CHARS};
pub use traits::{FieldContext, SiblingAccess, Validator};

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ErrorPayload;

/// Entry point for building validators.
///
/// Each method returns a concrete validator; call
/// [`shared`](Validator::shared) to attach it to a field.
pub struct Validators;

impl Validators {
    /// Fails on empty input (`null`, `""`, `[]`).
    pub fn required() -> BuiltinValidator {
        BuiltinValidator::Required
    }

    /// Requires at least `min` characters (or array items).
    pub fn min_length(min: usize) -> BuiltinValidator {
        BuiltinValidator::MinLength(min)
    }

    /// Allows at most `max` characters (or array items).
    pub fn max_length(max: usize) -> BuiltinValidator {
        BuiltinValidator::MaxLength(max)
    }

    /// Requires a numeric value of at least `min`.
    pub fn min(min: f64) -> BuiltinValidator {
        BuiltinValidator::Min(min)
    }

    /// Requires a numeric value of at most `max`.
    pub fn max(max: f64) -> BuiltinValidator {
        BuiltinValidator::Max(max)
    }

    /// Requires the whole value to match a regex.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{FieldContext, Validator, Validators};
    /// use serde_json::json;
    ///
    /// let zip = Validators::pattern(r"\d{5}").unwrap();
    /// let ctx = FieldContext::detached();
    ///
    /// assert!(zip.errors(&json!("12345"), &ctx).is_none());
    /// assert!(zip.errors(&json!("123456"), &ctx).is_some());
    /// ```
    pub fn pattern(pattern: &str) -> Result<BuiltinValidator, regex::Error> {
        BuiltinValidator::pattern(pattern)
    }

    /// Fails if the value contains any whitespace.
    pub fn no_whitespace() -> FormatValidator {
        FormatValidator::NoWhitespace
    }

    /// Requires a strict `local@domain.tld` email address.
    pub fn email() -> FormatValidator {
        FormatValidator::Email
    }

    /// Requires a phone number such as `(555) 123-4567`.
    pub fn phone_number() -> FormatValidator {
        FormatValidator::PhoneNumber
    }

    /// Requires an absolute URL with a scheme and host.
    pub fn url() -> FormatValidator {
        FormatValidator::Url
    }

    /// Requires a Luhn-valid card number.
    pub fn credit_card() -> FormatValidator {
        FormatValidator::CreditCard
    }

    /// Requires well-formed JSON text.
    pub fn json() -> FormatValidator {
        FormatValidator::Json
    }

    /// Requires length, mixed case, a digit and a special character.
    pub fn strong_password() -> StrongPassword {
        StrongPassword
    }

    /// Requires a number within `[min, max]`.
    pub fn range(min: f64, max: f64) -> RangeValidator {
        RangeValidator::new(min, max)
    }

    /// Requires a birth date at least `min_age` years ago, measured today.
    pub fn min_age(min_age: u32) -> MinAge {
        MinAge::new(min_age)
    }

    /// Requires a birth date at least `min_age` years before `today`.
    pub fn min_age_on(min_age: u32, today: NaiveDate) -> MinAge {
        MinAge::on(min_age, today)
    }

    /// Requires the value to equal the named sibling field's value.
    pub fn match_control(control_name: impl Into<String>) -> MatchControl {
        MatchControl::new(control_name)
    }

    /// Requires at least `min_required` checked entries in a checkbox group.
    pub fn required_checkbox_group(min_required: usize) -> RequiredCheckboxGroup {
        RequiredCheckboxGroup::new(min_required)
    }

    /// Runs all `validators` and merges their failures.
    pub fn compose(validators: Vec<Arc<dyn Validator>>) -> Compose {
        Compose::new(validators)
    }

    /// Wraps a closure as a validator reporting under `name`.
    pub fn custom<F>(name: &str, check: F) -> CustomValidator
    where
        F: Fn(&Value, &FieldContext<'_>) -> Option<ErrorPayload> + Send + Sync + 'static,
    {
        CustomValidator::new(name, check)
    }
}

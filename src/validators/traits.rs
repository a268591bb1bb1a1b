//! Traits for validator polymorphism.
//!
//! This module provides the [`Validator`] trait every validator implements,
//! and the [`FieldContext`] / [`SiblingAccess`] pair through which cross-field
//! validators read the other fields of their form.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::ValidationResult;

/// Read-only lookup of sibling field values by name.
///
/// A form hands its fields this capability instead of a pointer back to
/// itself, so fields never own their form.
pub trait SiblingAccess: Sync {
    /// Returns the current value of the named sibling, if it exists.
    fn sibling_value(&self, name: &str) -> Option<&Value>;
}

impl SiblingAccess for Map<String, Value> {
    fn sibling_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Where a value is being validated.
///
/// A detached context belongs to a field outside any form; cross-field
/// validators treat it as "nothing to compare against" and pass.
#[derive(Clone, Copy, Default)]
pub struct FieldContext<'a> {
    siblings: Option<&'a dyn SiblingAccess>,
}

impl<'a> FieldContext<'a> {
    /// Creates a context with no sibling fields.
    pub fn detached() -> Self {
        Self { siblings: None }
    }

    /// Creates a context that can look up sibling fields.
    pub fn with_siblings(siblings: &'a dyn SiblingAccess) -> Self {
        Self {
            siblings: Some(siblings),
        }
    }

    /// Returns true if sibling lookup is available.
    pub fn has_siblings(&self) -> bool {
        self.siblings.is_some()
    }

    /// Returns the named sibling's value, if there is a form and the field
    /// exists in it.
    pub fn sibling(&self, name: &str) -> Option<&'a Value> {
        self.siblings?.sibling_value(name)
    }
}

/// A pure check of one field value.
///
/// Validators are stateless: calling one twice with the same value and
/// context yields equal results, and calls may run concurrently. Failures are
/// reported as [`ValidationErrors`]; there is no other failure channel.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let email = Validators::email();
/// let ctx = FieldContext::detached();
///
/// assert!(email.validate(&json!("test@example.com"), &ctx).is_success());
/// assert!(email.errors(&json!("invalid-email"), &ctx).is_some());
/// ```
pub trait Validator: Send + Sync {
    /// Checks a value, returning `Success(())` or the failures found.
    fn validate(&self, value: &Value, ctx: &FieldContext<'_>) -> ValidationResult<()>;

    /// Checks a value, returning its errors or `None` when valid.
    fn errors(&self, value: &Value, ctx: &FieldContext<'_>) -> Option<ValidationErrors> {
        self.validate(value, ctx).into_result().err()
    }

    /// Wraps this validator for attaching to a field.
    fn shared(self) -> Arc<dyn Validator>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: &Value, ctx: &FieldContext<'_>) -> ValidationResult<()> {
        (**self).validate(value, ctx)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: &Value, ctx: &FieldContext<'_>) -> ValidationResult<()> {
        (**self).validate(value, ctx)
    }
}

/// Turns an optional failure into a validation result.
pub(crate) fn check(failure: Option<ValidationErrors>) -> ValidationResult<()> {
    match failure {
        Some(errors) => stillwater::Validation::Failure(errors),
        None => stillwater::Validation::Success(()),
    }
}

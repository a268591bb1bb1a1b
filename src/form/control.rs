//! A single form field.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::prelude::*;
use tracing::trace;

use crate::error::ValidationErrors;
use crate::presentation::{should_show_error, MessageCatalog};
use crate::validators::{FieldContext, Validator};

/// The validation state of one field.
///
/// `errors` is recomputed whenever the value changes. `touched` is set when
/// the user first leaves the field and is only cleared by a reset. `dirty` is
/// set when the user edits the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldState {
    /// Merged failures of every attached validator, or `None` when valid.
    pub errors: Option<ValidationErrors>,
    /// The user has blurred the field at least once.
    pub touched: bool,
    /// The user has changed the value.
    pub dirty: bool,
}

impl FieldState {
    /// Creates the state of a freshly registered field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no validator failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    /// Returns true if the field's error should be displayed.
    pub fn shows_error(&self) -> bool {
        should_show_error(self)
    }
}

/// A field value with its validators and state.
///
/// A control on its own validates with a detached context, so cross-field
/// validators pass. Inside a [`FormGroup`](super::FormGroup) the group
/// supplies sibling lookup.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FormControl, Validator, Validators};
/// use serde_json::json;
///
/// let mut email = FormControl::new(json!(""))
///     .with_label("Email")
///     .with_validators(vec![Validators::required().shared(), Validators::email().shared()]);
///
/// assert!(!email.is_valid());
/// assert!(!email.shows_error());
///
/// email.mark_touched();
/// assert_eq!(email.error_message(), "Email is required");
///
/// email.set_value(json!("test@example.com"));
/// assert!(email.is_valid());
/// assert_eq!(email.error_message(), "");
/// ```
#[derive(Clone)]
pub struct FormControl {
    value: Value,
    initial: Value,
    label: Option<String>,
    validators: Vec<Arc<dyn Validator>>,
    state: FieldState,
}

impl FormControl {
    /// Creates a control holding `value`, with no validators.
    pub fn new(value: Value) -> Self {
        Self {
            initial: value.clone(),
            value,
            label: None,
            validators: Vec::new(),
            state: FieldState::new(),
        }
    }

    /// Sets the human-readable label used in messages.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches validators and re-validates.
    pub fn with_validators(mut self, validators: Vec<Arc<dyn Validator>>) -> Self {
        self.attach_validators(validators);
        self
    }

    /// Attaches more validators and re-validates with a detached context.
    pub fn attach_validators(&mut self, validators: Vec<Arc<dyn Validator>>) {
        self.validators.extend(validators);
        self.refresh(&FieldContext::detached());
    }

    /// Returns the current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the label, if one was set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the number of attached validators.
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Returns the current state.
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Returns the current errors.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.state.errors.as_ref()
    }

    /// Returns true if no validator failed.
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Returns true if the field's error should be displayed.
    pub fn shows_error(&self) -> bool {
        self.state.shows_error()
    }

    /// Runs every attached validator against the current value.
    ///
    /// This does not update the stored state.
    pub fn evaluate(&self, ctx: &FieldContext<'_>) -> Option<ValidationErrors> {
        self.validators
            .iter()
            .filter_map(|validator| {
                let errors = validator.errors(&self.value, ctx);
                if let Some(errors) = &errors {
                    trace!(%errors, "validator failed");
                }
                errors
            })
            .reduce(Semigroup::combine)
    }

    /// Replaces the value and re-validates with a detached context.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
        self.refresh(&FieldContext::detached());
    }

    /// Marks the field as blurred. Errors are not re-evaluated.
    pub fn mark_touched(&mut self) {
        self.state.touched = true;
    }

    /// Marks the value as edited by the user.
    pub fn mark_dirty(&mut self) {
        self.state.dirty = true;
    }

    /// Restores the initial value, clears the flags and re-validates.
    pub fn reset(&mut self) {
        self.restore_initial();
        self.refresh(&FieldContext::detached());
    }

    /// Resolves the visible message with the standard catalog.
    pub fn error_message(&self) -> String {
        crate::presentation::resolve_message(&self.state, self.label())
    }

    /// Resolves the visible message with a custom catalog.
    pub fn error_message_with(&self, catalog: &MessageCatalog) -> String {
        catalog.resolve(&self.state, self.label())
    }

    fn refresh(&mut self, ctx: &FieldContext<'_>) {
        self.state.errors = self.evaluate(ctx);
    }

    pub(crate) fn set_errors(&mut self, errors: Option<ValidationErrors>) {
        self.state.errors = errors;
    }

    pub(crate) fn replace_value(&mut self, value: Value) {
        self.value = value;
    }

    pub(crate) fn restore_initial(&mut self) {
        self.value = self.initial.clone();
        self.state.touched = false;
        self.state.dirty = false;
    }
}

impl fmt::Debug for FormControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormControl")
            .field("value", &self.value)
            .field("label", &self.label)
            .field("validators", &self.validators.len())
            .field("state", &self.state)
            .finish()
    }
}

//! A named collection of form fields.

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Value};
use tracing::debug;

use super::{FieldState, FormControl, FormError};
use crate::error::ValidationErrors;
use crate::presentation::MessageCatalog;
use crate::validators::{FieldContext, SiblingAccess, Validator};

/// A form: an ordered set of named [`FormControl`]s.
///
/// The group owns its fields and lends itself to their validators as a
/// [`SiblingAccess`], so cross-field checks such as
/// [`MatchControl`](crate::MatchControl) can read other fields' values.
///
/// Changing any value re-evaluates every field, keeping cross-field results
/// current.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FormControl, FormGroup, Validator, Validators};
/// use serde_json::json;
///
/// let mut form = FormGroup::new()
///     .with_control("password", FormControl::new(json!("secret")))
///     .with_control(
///         "confirm",
///         FormControl::new(json!("other"))
///             .with_validators(vec![Validators::match_control("password").shared()]),
///     );
///
/// assert!(!form.is_valid());
///
/// form.set_value("confirm", json!("secret")).unwrap();
/// assert!(form.is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormGroup {
    controls: IndexMap<String, FormControl>,
}

impl FormGroup {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any field with the same name, and re-validates.
    pub fn add_control(&mut self, name: impl Into<String>, control: FormControl) {
        let name = name.into();
        debug!(field = %name, "registering field");
        self.controls.insert(name, control);
        self.validate_all();
    }

    /// Adds a field; builder form of [`add_control`](Self::add_control).
    pub fn with_control(mut self, name: impl Into<String>, control: FormControl) -> Self {
        self.add_control(name, control);
        self
    }

    /// Returns the named field.
    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.controls.get(name)
    }

    /// Returns true if the form has a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.controls.contains_key(name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns true if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Iterates field names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    /// Returns the named field's state.
    pub fn field_state(&self, name: &str) -> Option<&FieldState> {
        self.controls.get(name).map(FormControl::state)
    }

    /// Returns all values as a JSON object keyed by field name.
    pub fn value(&self) -> Value {
        Value::Object(
            self.controls
                .iter()
                .map(|(name, control)| (name.clone(), control.value().clone()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Attaches validators to a field and re-validates the form.
    pub fn attach_validators(
        &mut self,
        name: &str,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Result<(), FormError> {
        let control = self.control_mut(name)?;
        control.attach_validators(validators);
        debug!(field = name, validators = control.validator_count(), "validators attached");
        self.validate_all();
        Ok(())
    }

    /// Runs a field's validators with access to its siblings.
    ///
    /// This does not update the stored state.
    pub fn evaluate(&self, name: &str) -> Result<Option<ValidationErrors>, FormError> {
        let control = self.controls.get(name).ok_or_else(|| unknown(name))?;
        Ok(control.evaluate(&FieldContext::with_siblings(self)))
    }

    /// Replaces a field's value and re-validates the form.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        self.control_mut(name)?.replace_value(value);
        debug!(field = name, "value changed");
        self.validate_all();
        Ok(())
    }

    /// Records user input: replaces the value and marks the field dirty.
    pub fn input(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        self.control_mut(name)?.mark_dirty();
        self.set_value(name, value)
    }

    /// Marks a field as blurred. Errors are not re-evaluated.
    pub fn mark_touched(&mut self, name: &str) -> Result<(), FormError> {
        self.control_mut(name)?.mark_touched();
        debug!(field = name, "field touched");
        Ok(())
    }

    /// Marks a field's value as edited.
    pub fn mark_dirty(&mut self, name: &str) -> Result<(), FormError> {
        self.control_mut(name)?.mark_dirty();
        Ok(())
    }

    /// Marks every field as touched, as on a submit attempt.
    pub fn mark_all_as_touched(&mut self) {
        for control in self.controls.values_mut() {
            control.mark_touched();
        }
        debug!(fields = self.controls.len(), "all fields touched");
    }

    /// Restores every field's initial value, clears the flags and
    /// re-validates.
    pub fn reset(&mut self) {
        for control in self.controls.values_mut() {
            control.restore_initial();
        }
        debug!("form reset");
        self.validate_all();
    }

    /// Re-evaluates every field and stores the results.
    ///
    /// Fields are evaluated in parallel against a shared read-only view of
    /// the form; results are written back afterwards.
    pub fn validate_all(&mut self) {
        let results: Vec<Option<ValidationErrors>> = {
            let form: &Self = self;
            let controls: Vec<&FormControl> = form.controls.values().collect();
            controls
                .par_iter()
                .map(|control| control.evaluate(&FieldContext::with_siblings(form)))
                .collect()
        };

        for (control, errors) in self.controls.values_mut().zip(results) {
            control.set_errors(errors);
        }

        debug!(
            fields = self.controls.len(),
            invalid = self.controls.values().filter(|c| !c.is_valid()).count(),
            "form validated"
        );
    }

    /// Returns true if every field is valid.
    pub fn is_valid(&self) -> bool {
        self.controls.values().all(FormControl::is_valid)
    }

    /// Returns the errors of every invalid field, in registration order.
    pub fn errors(&self) -> IndexMap<String, ValidationErrors> {
        self.controls
            .iter()
            .filter_map(|(name, control)| control.errors().map(|e| (name.clone(), e.clone())))
            .collect()
    }

    /// Returns the visible message of every field currently showing an
    /// error, resolved with `catalog`.
    pub fn messages(&self, catalog: &MessageCatalog) -> IndexMap<String, String> {
        self.controls
            .iter()
            .filter(|(_, control)| control.shows_error())
            .map(|(name, control)| (name.clone(), control.error_message_with(catalog)))
            .collect()
    }

    fn control_mut(&mut self, name: &str) -> Result<&mut FormControl, FormError> {
        self.controls.get_mut(name).ok_or_else(|| unknown(name))
    }
}

impl Extend<(String, FormControl)> for FormGroup {
    /// Adds several fields, then re-validates the form once.
    fn extend<I: IntoIterator<Item = (String, FormControl)>>(&mut self, controls: I) {
        let before = self.controls.len();
        self.controls.extend(controls);
        debug!(added = self.controls.len() - before, "registering fields");
        self.validate_all();
    }
}

impl SiblingAccess for FormGroup {
    fn sibling_value(&self, name: &str) -> Option<&Value> {
        self.controls.get(name).map(FormControl::value)
    }
}

fn unknown(name: &str) -> FormError {
    FormError::UnknownField {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::validators::Validators;
    use serde_json::json;

    fn signup() -> FormGroup {
        FormGroup::new()
            .with_control(
                "email",
                FormControl::new(json!(""))
                    .with_label("Email")
                    .with_validators(vec![Validators::required().shared(), Validators::email().shared()]),
            )
            .with_control(
                "password",
                FormControl::new(json!("")).with_validators(vec![Validators::strong_password().shared()]),
            )
            .with_control(
                "confirm",
                FormControl::new(json!(""))
                    .with_label("Confirm password")
                    .with_validators(vec![Validators::match_control("password").shared()]),
            )
    }

    #[test]
    fn test_new_form_validates_on_registration() {
        let form = signup();
        assert!(!form.is_valid());
        assert!(form.field_state("email").unwrap().errors.is_some());
        assert!(form.field_state("password").unwrap().is_valid());
        assert!(form.messages(&MessageCatalog::new()).is_empty());
    }

    #[test]
    fn test_match_control_follows_sibling_changes() {
        let mut form = signup();
        form.set_value("password", json!("StrongP@ss1")).unwrap();
        assert!(form.field_state("confirm").unwrap().is_valid());

        form.set_value("confirm", json!("StrongP@ss2")).unwrap();
        let confirm = form.field_state("confirm").unwrap();
        assert!(confirm.errors.as_ref().unwrap().contains(&ErrorKind::MatchControl));

        form.set_value("confirm", json!("StrongP@ss1")).unwrap();
        assert!(form.field_state("confirm").unwrap().is_valid());

        form.set_value("password", json!("Changed@123")).unwrap();
        assert!(!form.field_state("confirm").unwrap().is_valid());
    }

    #[test]
    fn test_evaluate_does_not_store() {
        let mut form = signup();
        form.set_value("email", json!("test@example.com")).unwrap();
        assert!(form.evaluate("email").unwrap().is_none());
        assert!(form.evaluate("nope").is_err());
    }

    #[test]
    fn test_mark_all_as_touched_reveals_messages() {
        let mut form = signup();
        form.set_value("password", json!("weak")).unwrap();
        form.set_value("confirm", json!("weak2")).unwrap();
        form.mark_all_as_touched();

        let messages = form.messages(&MessageCatalog::new());
        assert_eq!(messages.get("email").map(String::as_str), Some("Email is required"));
        assert_eq!(
            messages.get("password").map(String::as_str),
            Some("Password must contain at least 8 characters, an uppercase letter, a number, a special character")
        );
        assert_eq!(
            messages.get("confirm").map(String::as_str),
            Some("Confirm password must match password")
        );
    }

    #[test]
    fn test_input_marks_dirty() {
        let mut form = signup();
        form.input("email", json!("a@b.co")).unwrap();
        let state = form.field_state("email").unwrap();
        assert!(state.dirty);
        assert!(!state.touched);
        assert!(state.is_valid());
    }

    #[test]
    fn test_reset_restores_every_field() {
        let mut form = signup();
        form.input("email", json!("a@b.co")).unwrap();
        form.mark_all_as_touched();
        form.reset();

        assert_eq!(form.value(), json!({"email": "", "password": "", "confirm": ""}));
        assert!(form.field_state("email").unwrap().errors.is_some());
        assert!(!form.field_state("email").unwrap().touched);
        assert!(!form.field_state("email").unwrap().dirty);
    }

    #[test]
    fn test_extend_validates_with_all_fields_present() {
        let mut form = FormGroup::new();
        form.extend(vec![
            (
                "confirm".to_string(),
                FormControl::new(json!("abc"))
                    .with_validators(vec![Validators::match_control("password").shared()]),
            ),
            ("password".to_string(), FormControl::new(json!("xyz"))),
        ]);

        assert_eq!(form.names().collect::<Vec<_>>(), vec!["confirm", "password"]);
        assert!(form
            .field_state("confirm")
            .unwrap()
            .errors
            .as_ref()
            .unwrap()
            .contains(&ErrorKind::MatchControl));
    }

    #[test]
    fn test_unknown_field_errors() {
        let mut form = signup();
        let err = form.set_value("missing", json!(1)).unwrap_err();
        assert_eq!(err.to_string(), "no field named 'missing' in form");
        assert!(form.mark_touched("missing").is_err());
        assert!(form.attach_validators("missing", Vec::new()).is_err());
    }

    #[test]
    fn test_errors_lists_invalid_fields_only() {
        let mut form = signup();
        form.set_value("email", json!("test@example.com")).unwrap();
        let errors = form.errors();
        assert!(errors.is_empty());

        form.set_value("email", json!("invalid-email")).unwrap();
        let errors = form.errors();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["email"]);
    }
}

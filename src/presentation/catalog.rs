//! Message templates and priority-ordered resolution.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{ErrorKind, ErrorPayload, PasswordIssues, ValidationErrors};
use crate::form::FieldState;

use super::should_show_error;

/// Label used when a field has none.
pub const DEFAULT_LABEL: &str = "This field";

/// Rendered in place of a template parameter the payload does not carry.
const MISSING_PARAM: &str = "undefined";

const FALLBACK_TEMPLATE: &str = "{field} is invalid";

/// Maps error kinds to message templates.
///
/// Templates use `{name}` placeholders. `{field}` is the field label,
/// `{requirements}` lists unmet password rules, and any other name is looked
/// up in the error payload (see [`ErrorPayload::param`]); parameters the
/// payload lacks render as `undefined`.
///
/// # Example
///
/// ```rust
/// use fieldguard::{ErrorKind, MessageCatalog, ValidationErrors};
///
/// let catalog = MessageCatalog::new()
///     .with_default_label("Value")
///     .with_template(ErrorKind::Email, "{field} doesn't look like an email");
///
/// let errors = ValidationErrors::flag(ErrorKind::Email);
/// assert_eq!(catalog.resolve_errors(&errors, None), "Value doesn't look like an email");
/// assert_eq!(
///     catalog.resolve_errors(&errors, Some("Work email")),
///     "Work email doesn't look like an email"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_label: String,
    templates: HashMap<ErrorKind, String>,
    fallback: String,
}

impl MessageCatalog {
    /// Creates a catalog with the standard English templates.
    pub fn new() -> Self {
        let templates = [
            (ErrorKind::Required, "{field} is required"),
            (ErrorKind::MinLength, "{field} must be at least {requiredLength} characters"),
            (ErrorKind::MaxLength, "{field} must not exceed {requiredLength} characters"),
            (ErrorKind::Min, "{field} must be at least {min}"),
            (ErrorKind::Max, "{field} must not exceed {max}"),
            (ErrorKind::Pattern, "{field} format is invalid"),
            (ErrorKind::Email, "{field} must be a valid email address"),
            (ErrorKind::Whitespace, "{field} cannot contain whitespace"),
            (ErrorKind::PhoneNumber, "{field} must be a valid phone number"),
            (ErrorKind::Url, "{field} must be a valid URL"),
            (ErrorKind::CreditCard, "{field} must be a valid credit card number"),
            (ErrorKind::Json, "{field} must be valid JSON"),
            (ErrorKind::StrongPassword, "Password must contain {requirements}"),
            (ErrorKind::MatchControl, "{field} must match {controlName}"),
            (ErrorKind::Range, "{field} must be between {min} and {max}"),
            (ErrorKind::MinAge, "Must be at least {requiredAge} years old"),
            (
                ErrorKind::RequiredCheckboxGroup,
                "Please select at least {minRequired} option(s)",
            ),
        ]
        .into_iter()
        .map(|(kind, template)| (kind, template.to_string()))
        .collect();

        Self {
            default_label: DEFAULT_LABEL.to_string(),
            templates,
            fallback: FALLBACK_TEMPLATE.to_string(),
        }
    }

    /// Sets the label used when a field has none.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Sets the template for a kind.
    ///
    /// Registering a template for a custom kind makes it resolvable; custom
    /// kinds rank after every built-in kind.
    pub fn with_template(mut self, kind: ErrorKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    /// Sets the template used when no reported kind has a template.
    pub fn with_fallback(mut self, template: impl Into<String>) -> Self {
        self.fallback = template.into();
        self
    }

    /// Applies overrides from a JSON object.
    ///
    /// The object may carry `defaultLabel`, `fallback`, and a `templates`
    /// object keyed by kind name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if the overrides do not have that
    /// shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{ErrorKind, MessageCatalog, ValidationErrors};
    /// use serde_json::json;
    ///
    /// let catalog = MessageCatalog::from_json(&json!({
    ///     "defaultLabel": "Ce champ",
    ///     "templates": {"required": "{field} est obligatoire"}
    /// }))
    /// .unwrap();
    ///
    /// let errors = ValidationErrors::flag(ErrorKind::Required);
    /// assert_eq!(catalog.resolve_errors(&errors, None), "Ce champ est obligatoire");
    /// ```
    pub fn from_json(overrides: &Value) -> Result<Self, CatalogError> {
        let overrides = CatalogOverrides::deserialize(overrides)?;
        let mut catalog = Self::new();
        if let Some(label) = overrides.default_label {
            catalog.default_label = label;
        }
        if let Some(fallback) = overrides.fallback {
            catalog.fallback = fallback;
        }
        for (name, template) in overrides.templates {
            catalog.templates.insert(ErrorKind::from_name(&name), template);
        }
        Ok(catalog)
    }

    /// Returns the label used when a field has none.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Returns the template for a kind, if any.
    pub fn template(&self, kind: &ErrorKind) -> Option<&str> {
        self.templates.get(kind).map(String::as_str)
    }

    /// Resolves the message to display for a field.
    ///
    /// Returns the empty string unless the display gate is open (the field is
    /// touched and has errors).
    pub fn resolve(&self, state: &FieldState, label: Option<&str>) -> String {
        match &state.errors {
            Some(errors) if should_show_error(state) => self.resolve_errors(errors, label),
            _ => String::new(),
        }
    }

    /// Resolves errors to a single message, ignoring the display gate.
    ///
    /// The first kind of [`ErrorKind::PRIORITY`] present in `errors` decides
    /// the message. Failing that, the first reported custom kind that has a
    /// template decides it. Otherwise the fallback template is used.
    pub fn resolve_errors(&self, errors: &ValidationErrors, label: Option<&str>) -> String {
        let field = label.unwrap_or(&self.default_label);

        let builtin = ErrorKind::PRIORITY.into_iter().find_map(|kind| {
            let (kind, payload) = errors.get_entry(&kind)?;
            let template = self.templates.get(kind)?;
            Some((kind, payload, template))
        });
        let custom = || {
            errors.iter().find_map(|(kind, payload)| {
                let template = self.templates.get(kind).filter(|_| kind.is_custom())?;
                Some((kind, payload, template))
            })
        };

        match builtin.or_else(custom) {
            Some((kind, payload, template)) => render(template, field, kind, payload),
            None => {
                warn!(kinds = %errors, "no message template for reported errors, using fallback");
                render(&self.fallback, field, errors.highest_priority().0, &ErrorPayload::Flag)
            }
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog overrides as read from JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CatalogOverrides {
    default_label: Option<String>,
    fallback: Option<String>,
    #[serde(default)]
    templates: HashMap<String, String>,
}

/// Errors that can occur while loading a message catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The overrides were not an object of string templates.
    #[error("invalid message catalog: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Fills `{name}` placeholders in a template.
fn render(template: &str, field: &str, kind: &ErrorKind, payload: &ErrorPayload) -> String {
    let mut out = String::with_capacity(template.len() + field.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match name {
            "field" => out.push_str(field),
            "requirements" => out.push_str(&password_requirements(payload).join(", ")),
            _ => match payload.param(name) {
                Some(value) => out.push_str(&value),
                None => {
                    warn!(%kind, param = name, "error payload is missing a template parameter");
                    out.push_str(MISSING_PARAM);
                }
            },
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Unmet password rules, read from a typed or free-form payload.
fn password_requirements(payload: &ErrorPayload) -> Vec<&'static str> {
    match payload {
        ErrorPayload::Password(issues) => issues.unmet_requirements(),
        ErrorPayload::Detail(Value::Object(obj)) => {
            PasswordIssues::from_object(obj).unmet_requirements()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeActual;
    use serde_json::json;
    use stillwater::prelude::*;

    fn resolve(errors: &ValidationErrors) -> String {
        MessageCatalog::new().resolve_errors(errors, Some("Test Field"))
    }

    #[test]
    fn test_render_placeholders() {
        let payload = ErrorPayload::Range {
            min: 1.0,
            max: 10.0,
            actual: RangeActual::Parsed(15.0),
        };
        assert_eq!(
            render("{field} must be between {min} and {max}", "Age", &ErrorKind::Range, &payload),
            "Age must be between 1 and 10"
        );
    }

    #[test]
    fn test_render_missing_param_is_undefined() {
        assert_eq!(
            render("{field} must be between {min} and {max}", "Age", &ErrorKind::Range, &ErrorPayload::Flag),
            "Age must be between undefined and undefined"
        );
    }

    #[test]
    fn test_render_unclosed_brace_is_literal() {
        assert_eq!(
            render("{field} costs {", "Item", &ErrorKind::Required, &ErrorPayload::Flag),
            "Item costs {"
        );
    }

    #[test]
    fn test_every_builtin_kind_has_a_template() {
        let catalog = MessageCatalog::new();
        for kind in ErrorKind::PRIORITY {
            assert!(catalog.template(&kind).is_some(), "{}", kind);
        }
    }

    #[test]
    fn test_standard_messages() {
        let cases = [
            (ValidationErrors::flag(ErrorKind::Required), "Test Field is required"),
            (
                ValidationErrors::single(
                    ErrorKind::MinLength,
                    ErrorPayload::Length {
                        required_length: 5,
                        actual_length: 2,
                    },
                ),
                "Test Field must be at least 5 characters",
            ),
            (
                ValidationErrors::single(
                    ErrorKind::MaxLength,
                    ErrorPayload::Length {
                        required_length: 5,
                        actual_length: 11,
                    },
                ),
                "Test Field must not exceed 5 characters",
            ),
            (
                ValidationErrors::single(ErrorKind::Min, ErrorPayload::Min { min: 3.0, actual: 1.0 }),
                "Test Field must be at least 3",
            ),
            (
                ValidationErrors::single(ErrorKind::Max, ErrorPayload::Max { max: 9.5, actual: 10.0 }),
                "Test Field must not exceed 9.5",
            ),
            (ValidationErrors::flag(ErrorKind::Whitespace), "Test Field cannot contain whitespace"),
            (ValidationErrors::flag(ErrorKind::Url), "Test Field must be a valid URL"),
            (ValidationErrors::flag(ErrorKind::Json), "Test Field must be valid JSON"),
            (
                ValidationErrors::single(
                    ErrorKind::MatchControl,
                    ErrorPayload::Control {
                        control_name: "password".into(),
                    },
                ),
                "Test Field must match password",
            ),
            (
                ValidationErrors::single(
                    ErrorKind::MinAge,
                    ErrorPayload::Age {
                        required_age: 18,
                        actual_age: Some(16),
                    },
                ),
                "Must be at least 18 years old",
            ),
            (
                ValidationErrors::single(
                    ErrorKind::RequiredCheckboxGroup,
                    ErrorPayload::CheckboxGroup {
                        min_required: 2,
                        actual: None,
                    },
                ),
                "Please select at least 2 option(s)",
            ),
        ];

        for (errors, expected) in cases {
            assert_eq!(resolve(&errors), expected);
        }
    }

    #[test]
    fn test_password_message_lists_unmet_rules_in_order() {
        let errors = ValidationErrors::single(
            ErrorKind::StrongPassword,
            ErrorPayload::Password(PasswordIssues {
                special_char: true,
                min_length: true,
                number: true,
                ..PasswordIssues::default()
            }),
        );
        assert_eq!(
            resolve(&errors),
            "Password must contain at least 8 characters, a number, a special character"
        );
    }

    #[test]
    fn test_password_message_from_detail_payload() {
        let errors = ValidationErrors::single(
            ErrorKind::StrongPassword,
            ErrorPayload::Detail(json!({"uppercase": true, "lowercase": false})),
        );
        assert_eq!(resolve(&errors), "Password must contain an uppercase letter");
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let errors = ValidationErrors::flag(ErrorKind::Custom("taken".into()));
        assert_eq!(resolve(&errors), "Test Field is invalid");
    }

    #[test]
    fn test_custom_template() {
        let catalog = MessageCatalog::new()
            .with_template(ErrorKind::Custom("taken".into()), "{field} '{value}' is taken");
        let errors = ValidationErrors::single(
            ErrorKind::Custom("taken".into()),
            ErrorPayload::Detail(json!({"value": "alice"})),
        );
        assert_eq!(catalog.resolve_errors(&errors, Some("Username")), "Username 'alice' is taken");
    }

    #[test]
    fn test_builtin_beats_custom_template() {
        let catalog = MessageCatalog::new()
            .with_template(ErrorKind::Custom("taken".into()), "{field} is taken");
        let errors = ValidationErrors::flag(ErrorKind::Custom("taken".into()))
            .combine(ValidationErrors::flag(ErrorKind::RequiredCheckboxGroup));
        assert_eq!(
            catalog.resolve_errors(&errors, None),
            "Please select at least undefined option(s)"
        );
    }

    #[test]
    fn test_custom_fallback() {
        let catalog = MessageCatalog::new().with_fallback("Please check {field}");
        let errors = ValidationErrors::flag(ErrorKind::Custom("odd".into()));
        assert_eq!(catalog.resolve_errors(&errors, None), "Please check This field");
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        assert!(MessageCatalog::from_json(&json!({"templates": {"required": 5}})).is_err());
        assert!(MessageCatalog::from_json(&json!({"unknown": "x"})).is_err());
        assert!(MessageCatalog::from_json(&json!("nope")).is_err());
    }

    #[test]
    fn test_from_json_custom_kind_template() {
        let catalog = MessageCatalog::from_json(&json!({
            "fallback": "{field} looks wrong",
            "templates": {"reservedName": "{field} is reserved"}
        }))
        .unwrap();

        let reserved = ValidationErrors::flag(ErrorKind::Custom("reservedName".into()));
        assert_eq!(catalog.resolve_errors(&reserved, Some("Username")), "Username is reserved");

        let other = ValidationErrors::flag(ErrorKind::Custom("other".into()));
        assert_eq!(catalog.resolve_errors(&other, Some("Username")), "Username looks wrong");
    }
}

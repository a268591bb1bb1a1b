//! Declarative form definitions.
//!
//! A [`FormDefinition`] describes a form's fields and their validators as
//! JSON. Building it against a [`ValidatorRegistry`] yields a ready
//! [`FormGroup`].
//!
//! ```json
//! {
//!   "fields": [
//!     {"name": "email", "label": "Email", "validators": ["required", "email"]},
//!     {"name": "age", "value": 30, "validators": [{"range": [18, 120]}]}
//!   ]
//! }
//! ```
//!
//! A validator entry is either a registered name, or a single-key object
//! naming a parameterised validator: `range` (`[min, max]` or
//! `{"min", "max"}`), `minlength`, `maxlength`, `min`, `max`, `minAge`,
//! `matchControl`, `pattern` or `requiredCheckboxGroup`.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::{FormControl, FormGroup};
use crate::registry::ValidatorRegistry;
use crate::validators::{Validator, Validators};

/// A form described as data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDefinition {
    /// Fields in display order.
    pub fields: Vec<FieldDefinition>,
}

/// One field of a [`FormDefinition`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    /// Key of the field within the form.
    pub name: String,
    /// Label used in messages.
    #[serde(default)]
    pub label: Option<String>,
    /// Initial value; `null` when omitted.
    #[serde(default)]
    pub value: Value,
    /// Validators in attach order.
    #[serde(default)]
    pub validators: Vec<ValidatorSpec>,
}

/// A validator reference inside a field definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValidatorSpec {
    /// A validator registered under this name.
    Named(String),
    /// A parameterised validator, as `{"name": parameters}`.
    Configured(Map<String, Value>),
}

impl FormDefinition {
    /// Reads a definition from a JSON value.
    pub fn from_json(value: &Value) -> Result<Self, DefinitionError> {
        Ok(Self::deserialize(value)?)
    }

    /// Builds a form, resolving validator names through `registry`.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate field name, an unknown validator name, bad
    /// validator parameters, or an invalid pattern.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{FormDefinition, ValidatorRegistry};
    /// use serde_json::json;
    ///
    /// let definition = FormDefinition::from_json(&json!({
    ///     "fields": [
    ///         {"name": "password", "validators": ["required", "strongPassword"]},
    ///         {"name": "confirm", "label": "Confirmation", "validators": [{"matchControl": "password"}]}
    ///     ]
    /// }))
    /// .unwrap();
    ///
    /// let mut form = definition.build(&ValidatorRegistry::with_builtins()).unwrap();
    /// form.set_value("password", json!("StrongP@ss1")).unwrap();
    /// form.set_value("confirm", json!("StrongP@ss1")).unwrap();
    /// assert!(form.is_valid());
    /// ```
    pub fn build(&self, registry: &ValidatorRegistry) -> Result<FormGroup, DefinitionError> {
        let mut seen = HashSet::new();
        let mut controls = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DefinitionError::DuplicateField(field.name.clone()));
            }

            let validators = field
                .validators
                .iter()
                .map(|spec| resolve(&field.name, spec, registry))
                .collect::<Result<Vec<_>, _>>()?;

            let mut control = FormControl::new(field.value.clone()).with_validators(validators);
            if let Some(label) = &field.label {
                control = control.with_label(label.clone());
            }
            controls.push((field.name.clone(), control));
        }

        let mut form = FormGroup::new();
        form.extend(controls);
        Ok(form)
    }
}

impl FromStr for FormDefinition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

fn resolve(
    field: &str,
    spec: &ValidatorSpec,
    registry: &ValidatorRegistry,
) -> Result<Arc<dyn Validator>, DefinitionError> {
    match spec {
        ValidatorSpec::Named(name) => registry.get(name).ok_or_else(|| {
            warn!(field, validator = %name, "form definition references an unknown validator");
            DefinitionError::UnknownValidator {
                field: field.to_string(),
                name: name.clone(),
            }
        }),
        ValidatorSpec::Configured(entry) => {
            let mut entries = entry.iter();
            let (Some((name, params)), None) = (entries.next(), entries.next()) else {
                return Err(DefinitionError::InvalidParameters {
                    field: field.to_string(),
                    validator: entry.keys().cloned().collect::<Vec<_>>().join(", "),
                    reason: "expected an object with exactly one validator name".into(),
                });
            };
            configure(field, name, params, registry)
        }
    }
}

fn configure(
    field: &str,
    name: &str,
    params: &Value,
    registry: &ValidatorRegistry,
) -> Result<Arc<dyn Validator>, DefinitionError> {
    let invalid = |reason: &str| DefinitionError::InvalidParameters {
        field: field.to_string(),
        validator: name.to_string(),
        reason: reason.to_string(),
    };

    let validator = match name {
        "minlength" | "minLength" => {
            let min = params.as_u64().ok_or_else(|| invalid("expected a non-negative integer"))?;
            Validators::min_length(min as usize).shared()
        }
        "maxlength" | "maxLength" => {
            let max = params.as_u64().ok_or_else(|| invalid("expected a non-negative integer"))?;
            Validators::max_length(max as usize).shared()
        }
        "min" => Validators::min(params.as_f64().ok_or_else(|| invalid("expected a number"))?).shared(),
        "max" => Validators::max(params.as_f64().ok_or_else(|| invalid("expected a number"))?).shared(),
        "range" => {
            let (min, max) = range_bounds(params).ok_or_else(|| invalid("expected [min, max] or {\"min\", \"max\"}"))?;
            if min > max {
                return Err(invalid("min must not exceed max"));
            }
            Validators::range(min, max).shared()
        }
        "minAge" => {
            let years = params
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| invalid("expected a non-negative integer"))?;
            Validators::min_age(years).shared()
        }
        "matchControl" => {
            let other = params.as_str().ok_or_else(|| invalid("expected a field name"))?;
            Validators::match_control(other).shared()
        }
        "pattern" => {
            let pattern = params.as_str().ok_or_else(|| invalid("expected a regular expression"))?;
            Validators::pattern(pattern)
                .map_err(|source| DefinitionError::InvalidPattern {
                    field: field.to_string(),
                    pattern: pattern.to_string(),
                    source,
                })?
                .shared()
        }
        "requiredCheckboxGroup" => {
            let min = match params {
                Value::Null => 1,
                other => other.as_u64().ok_or_else(|| invalid("expected a non-negative integer"))? as usize,
            };
            Validators::required_checkbox_group(min).shared()
        }
        // Registered validators take no parameters.
        other => match (registry.get(other), params) {
            (Some(validator), Value::Null | Value::Bool(true)) => validator,
            (Some(_), _) => return Err(invalid("validator takes no parameters")),
            (None, _) => {
                warn!(field, validator = other, "form definition references an unknown validator");
                return Err(DefinitionError::UnknownValidator {
                    field: field.to_string(),
                    name: other.to_string(),
                });
            }
        },
    };

    Ok(validator)
}

fn range_bounds(params: &Value) -> Option<(f64, f64)> {
    match params {
        Value::Array(bounds) if bounds.len() == 2 => Some((bounds[0].as_f64()?, bounds[1].as_f64()?)),
        Value::Object(bounds) => Some((bounds.get("min")?.as_f64()?, bounds.get("max")?.as_f64()?)),
        _ => None,
    }
}

/// Errors raised while loading or building a [`FormDefinition`].
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The definition is not valid JSON or does not have the expected shape.
    #[error("invalid form definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field refers to a validator name that is not registered.
    #[error("field '{field}' uses unknown validator '{name}'")]
    UnknownValidator {
        /// Field carrying the reference.
        field: String,
        /// The unresolved name.
        name: String,
    },

    /// A parameterised validator was given unusable parameters.
    #[error("field '{field}': invalid parameters for '{validator}': {reason}")]
    InvalidParameters {
        /// Field carrying the validator.
        field: String,
        /// Validator name.
        validator: String,
        /// What was wrong.
        reason: String,
    },

    /// A `pattern` validator's regular expression failed to compile.
    #[error("field '{field}': invalid pattern '{pattern}'")]
    InvalidPattern {
        /// Field carrying the validator.
        field: String,
        /// The pattern as written.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: regex::Error,
    },

    /// Two fields share a name.
    #[error("duplicate field '{0}'")]
    DuplicateField(String),
}

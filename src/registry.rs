//! Named validator storage.
//!
//! This module provides the [`ValidatorRegistry`] type that stores validators
//! under string names so form definitions can refer to them.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::validators::{FieldContext, Validator, Validators};
use crate::ValidationResult;

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<HashMap<String, Arc<dyn Validator>>>>;

/// A thread-safe registry of named validators.
///
/// Cloning a registry shares its storage: a validator registered through one
/// handle is visible through every clone.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can look up validators concurrently
/// - Registration operations are serialized
///
/// # Example
///
/// ```rust
/// use fieldguard::{ValidatorRegistry, Validators};
/// use serde_json::json;
///
/// let registry = ValidatorRegistry::with_builtins();
/// registry.register("username", Validators::pattern("[a-z0-9_]{3,16}").unwrap()).unwrap();
///
/// assert!(registry.validate("username", &json!("ada_l")).unwrap().is_success());
/// assert!(registry.validate("email", &json!("nope")).unwrap().is_failure());
/// ```
pub struct ValidatorRegistry {
    validators: ValidatorMap,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a registry holding every parameterless built-in validator
    /// under its conventional name.
    ///
    /// The names are `required`, `email`, `noWhitespace`, `phoneNumber`,
    /// `strongPassword`, `url`, `creditCard`, `json` and
    /// `requiredCheckboxGroup` (at least one selection).
    pub fn with_builtins() -> Self {
        let builtins: [(&str, Arc<dyn Validator>); 9] = [
            ("required", Validators::required().shared()),
            ("email", Validators::email().shared()),
            ("noWhitespace", Validators::no_whitespace().shared()),
            ("phoneNumber", Validators::phone_number().shared()),
            ("strongPassword", Validators::strong_password().shared()),
            ("url", Validators::url().shared()),
            ("creditCard", Validators::credit_card().shared()),
            ("json", Validators::json().shared()),
            (
                "requiredCheckboxGroup",
                Validators::required_checkbox_group(1).shared(),
            ),
        ];

        let map = builtins
            .into_iter()
            .map(|(name, validator)| (name.to_string(), validator))
            .collect();
        Self {
            validators: Arc::new(RwLock::new(map)),
        }
    }

    /// Registers a validator with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{ValidatorRegistry, Validators};
    ///
    /// let registry = ValidatorRegistry::new();
    /// registry.register("zip", Validators::pattern("[0-9]{5}").unwrap()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("zip", Validators::required()).is_err());
    /// ```
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(name = %name, "validator registered");
        validators.insert(name, validator.shared());
        Ok(())
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if a validator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Checks a standalone value against a named validator.
    ///
    /// The value is checked with a detached context, so cross-field
    /// validators pass.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name isn't registered.
    pub fn validate(&self, name: &str, value: &Value) -> Result<ValidationResult<()>, RegistryError> {
        let validator = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(validator.validate(value, &FieldContext::detached()))
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValidatorRegistry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
        }
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Looked up a validator name that doesn't exist.
    #[error("validator '{0}' not found")]
    NotFound(String),
}

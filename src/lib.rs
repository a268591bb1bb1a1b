//! # Fieldguard
//!
//! Form-field validation with deterministic, user-facing error messages.
//!
//! ## Overview
//!
//! A field can fail several validators at once. Fieldguard runs every
//! validator attached to a field and accumulates all their failures through
//! stillwater's `Validation` type, then collapses them into the single message
//! a user should see, by a fixed priority order and only once the field has
//! been touched.
//!
//! ## Core Types
//!
//! - [`Validator`]: A pure check of one field value; built by [`Validators`]
//! - [`ValidationErrors`]: The merged failures of one field, keyed by [`ErrorKind`]
//! - [`FormControl`] / [`FormGroup`]: Fields with values, validators and [`FieldState`]
//! - [`MessageCatalog`]: Message templates used by [`resolve_message`]
//! - [`ValidatorRegistry`]: Named validators for [`FormDefinition`]s
//!
//! ## Example
//!
//! ```rust
//! use fieldguard::{FormControl, FormGroup, Validator, Validators};
//! use serde_json::json;
//!
//! let mut form = FormGroup::new().with_control(
//!     "email",
//!     FormControl::new(json!(""))
//!         .with_label("Email")
//!         .with_validators(vec![Validators::required().shared(), Validators::email().shared()]),
//! );
//!
//! // Invalid, but not yet shown.
//! assert!(!form.is_valid());
//! assert_eq!(form.control("email").unwrap().error_message(), "");
//!
//! form.input("email", json!("invalid-email")).unwrap();
//! form.mark_touched("email").unwrap();
//! assert_eq!(
//!     form.control("email").unwrap().error_message(),
//!     "Email must be a valid email address"
//! );
//! ```

pub mod error;
pub mod form;
pub mod presentation;
pub mod registry;
pub mod validators;
pub mod value;

pub use error::{ErrorKind, ErrorPayload, PasswordIssues, RangeActual, ValidationErrors};
pub use form::{
    DefinitionError, FieldDefinition, FieldState, FormControl, FormDefinition, FormError,
    FormGroup, ValidatorSpec,
};
pub use presentation::{
    resolve_message, should_show_error, standard_catalog, CatalogError, MessageCatalog,
    DEFAULT_LABEL,
};
pub use registry::{RegistryError, ValidatorRegistry};
pub use validators::{
    BuiltinValidator, Compose, CustomValidator, FieldContext, FormatValidator, MatchControl,
    MinAge, RangeValidator, RequiredCheckboxGroup, SiblingAccess, StrongPassword, Validator,
    Validators,
};

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;

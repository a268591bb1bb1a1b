//! The form model: fields, their state, and forms built from definitions.
//!
//! A [`FormControl`] owns one value, its attached validators and its
//! [`FieldState`]. A [`FormGroup`] owns named controls and gives their
//! validators read access to sibling values. [`FormDefinition`] builds a
//! group from JSON.

mod control;
mod definition;
mod group;

pub use control::{FieldState, FormControl};
pub use definition::{DefinitionError, FieldDefinition, FormDefinition, ValidatorSpec};
pub use group::FormGroup;

/// Errors from field-addressed [`FormGroup`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// No field with this name exists in the form.
    #[error("no field named '{name}' in form")]
    UnknownField {
        /// The requested field name.
        name: String,
    },
}

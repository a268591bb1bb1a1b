//! Turning field errors into the one message a user sees.
//!
//! A field may fail several validators at once. Presentation collapses those
//! failures into a single message by a fixed priority order, and only shows it
//! once the user has touched the field.
//!
//! # Example
//!
//! ```rust
//! use fieldguard::{resolve_message, should_show_error, ErrorKind, FieldState, ValidationErrors};
//! use stillwater::prelude::*;
//!
//! let mut state = FieldState::new();
//! state.errors = Some(
//!     ValidationErrors::flag(ErrorKind::Email).combine(ValidationErrors::flag(ErrorKind::Required)),
//! );
//!
//! // Untouched fields stay quiet.
//! assert!(!should_show_error(&state));
//! assert_eq!(resolve_message(&state, Some("Email")), "");
//!
//! state.touched = true;
//! assert!(should_show_error(&state));
//! assert_eq!(resolve_message(&state, Some("Email")), "Email is required");
//! ```

mod catalog;

pub use catalog::{CatalogError, MessageCatalog, DEFAULT_LABEL};

use std::sync::LazyLock;

use crate::form::FieldState;

static STANDARD_CATALOG: LazyLock<MessageCatalog> = LazyLock::new(MessageCatalog::new);

/// Returns the catalog of standard English messages.
pub fn standard_catalog() -> &'static MessageCatalog {
    &STANDARD_CATALOG
}

/// Returns true when a field's error should be displayed.
///
/// The gate opens only when the field has errors and has been touched.
pub fn should_show_error(state: &FieldState) -> bool {
    state.touched && state.errors.is_some()
}

/// Resolves the message to display for a field with the standard catalog.
///
/// `label` names the field in the message and defaults to "This field".
/// Returns the empty string while the display gate is closed.
pub fn resolve_message(state: &FieldState, label: Option<&str>) -> String {
    STANDARD_CATALOG.resolve(state, label)
}

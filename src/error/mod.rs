//! Error types for validation failures.
//!
//! This module provides [`ErrorKind`] and [`ErrorPayload`] for describing a
//! single failure, and [`ValidationErrors`] for the merged failures of one
//! field.

mod kind;
mod validation_errors;

pub use kind::{ErrorKind, ErrorPayload, PasswordIssues, RangeActual};
pub use validation_errors::ValidationErrors;

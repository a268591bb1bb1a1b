//! Integration tests for message resolution and the display gate.

use fieldguard::{
    resolve_message, should_show_error, standard_catalog, ErrorKind, ErrorPayload, FieldState,
    MessageCatalog, RangeActual, ValidationErrors, DEFAULT_LABEL,
};
use serde_json::json;
use stillwater::prelude::*;

fn touched(errors: ValidationErrors) -> FieldState {
    FieldState {
        errors: Some(errors),
        touched: true,
        dirty: false,
    }
}

#[test]
fn test_required_wins_over_email() {
    let state = touched(
        ValidationErrors::flag(ErrorKind::Email).combine(ValidationErrors::flag(ErrorKind::Required)),
    );
    assert_eq!(resolve_message(&state, Some("Email")), "Email is required");
}

#[test]
fn test_priority_follows_fixed_order_not_insertion() {
    let state = touched(
        ValidationErrors::single(
            ErrorKind::Range,
            ErrorPayload::Range {
                min: 1.0,
                max: 10.0,
                actual: RangeActual::Parsed(15.0),
            },
        )
        .combine(ValidationErrors::flag(ErrorKind::Whitespace))
        .combine(ValidationErrors::flag(ErrorKind::Url)),
    );
    assert_eq!(resolve_message(&state, Some("Site")), "Site cannot contain whitespace");
}

#[test]
fn test_untouched_or_valid_is_silent() {
    let untouched = FieldState {
        errors: Some(ValidationErrors::flag(ErrorKind::Required)),
        touched: false,
        dirty: true,
    };
    assert!(!should_show_error(&untouched));
    assert_eq!(resolve_message(&untouched, None), "");

    let valid = FieldState {
        errors: None,
        touched: true,
        dirty: true,
    };
    assert!(!should_show_error(&valid));
    assert_eq!(resolve_message(&valid, None), "");
}

#[test]
fn test_default_label() {
    let state = touched(ValidationErrors::flag(ErrorKind::Required));
    assert_eq!(resolve_message(&state, None), format!("{} is required", DEFAULT_LABEL));
}

#[test]
fn test_range_message() {
    let state = touched(ValidationErrors::single(
        ErrorKind::Range,
        ErrorPayload::Range {
            min: 1.0,
            max: 10.0,
            actual: RangeActual::Parsed(15.0),
        },
    ));
    assert_eq!(resolve_message(&state, Some("Quantity")), "Quantity must be between 1 and 10");
}

#[test]
fn test_messages_from_wire_shaped_errors() {
    let errors = ValidationErrors::from_json(&json!({
        "minAge": {"requiredAge": 21, "actualAge": 19}
    }))
    .unwrap();
    assert_eq!(resolve_message(&touched(errors), None), "Must be at least 21 years old");

    let errors = ValidationErrors::from_json(&json!({
        "strongPassword": {"uppercase": true, "specialChar": true}
    }))
    .unwrap();
    assert_eq!(
        resolve_message(&touched(errors), None),
        "Password must contain an uppercase letter, a special character"
    );
}

#[test]
fn test_malformed_payload_renders_undefined() {
    let errors = ValidationErrors::from_json(&json!({"range": true})).unwrap();
    assert_eq!(
        resolve_message(&touched(errors), Some("Age")),
        "Age must be between undefined and undefined"
    );
}

#[test]
fn test_unknown_custom_kind_falls_back() {
    let errors = ValidationErrors::flag(ErrorKind::Custom("usernameTaken".into()));
    assert_eq!(resolve_message(&touched(errors), Some("Username")), "Username is invalid");
}

#[test]
fn test_custom_catalog_templates_and_fallback() {
    let catalog = MessageCatalog::from_json(&json!({
        "defaultLabel": "Field",
        "fallback": "{field} needs attention",
        "templates": {
            "required": "Please fill in {field}",
            "usernameTaken": "{field} is already taken"
        }
    }))
    .unwrap();

    let required = touched(ValidationErrors::flag(ErrorKind::Required));
    assert_eq!(catalog.resolve(&required, None), "Please fill in Field");

    let taken = touched(
        ValidationErrors::flag(ErrorKind::Custom("other".into()))
            .combine(ValidationErrors::flag(ErrorKind::Custom("usernameTaken".into()))),
    );
    assert_eq!(catalog.resolve(&taken, Some("Username")), "Username is already taken");

    let unknown = touched(ValidationErrors::flag(ErrorKind::Custom("other".into())));
    assert_eq!(catalog.resolve(&unknown, Some("Username")), "Username needs attention");

    // Built-in templates not overridden are kept.
    let email = touched(ValidationErrors::flag(ErrorKind::Email));
    assert_eq!(catalog.resolve(&email, None), "Field must be a valid email address");
}

#[test]
fn test_catalog_rejects_bad_overrides() {
    assert!(MessageCatalog::from_json(&json!({"templates": {"required": 3}})).is_err());
    assert!(MessageCatalog::from_json(&json!({"unknown": "x"})).is_err());
    assert!(MessageCatalog::from_json(&json!("nope")).is_err());
}

#[test]
fn test_standard_catalog_is_shared() {
    assert!(std::ptr::eq(standard_catalog(), standard_catalog()));
    assert_eq!(standard_catalog().default_label(), DEFAULT_LABEL);
}

//! Integration tests for the validator registry.

use fieldguard::{ErrorKind, RegistryError, Validator, ValidatorRegistry, Validators};
use serde_json::json;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

#[test]
fn test_register_and_validate() {
    let registry = ValidatorRegistry::new();
    registry
        .register("zip", Validators::pattern("[0-9]{5}").unwrap())
        .unwrap();

    assert!(registry.validate("zip", &json!("12345")).unwrap().is_success());
    let errors = unwrap_failure(registry.validate("zip", &json!("1234")).unwrap());
    assert!(errors.contains(&ErrorKind::Pattern));
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = ValidatorRegistry::new();
    registry.register("required", Validators::required()).unwrap();

    let result = registry.register("required", Validators::required());
    assert!(matches!(result, Err(RegistryError::DuplicateName(name)) if name == "required"));
}

#[test]
fn test_missing_validator() {
    let registry = ValidatorRegistry::with_builtins();
    assert!(registry.get("zip").is_none());
    assert!(matches!(
        registry.validate("zip", &json!("12345")),
        Err(RegistryError::NotFound(name)) if name == "zip"
    ));
}

#[test]
fn test_builtins_behave_like_factories() {
    let registry = ValidatorRegistry::with_builtins();

    assert!(registry.validate("creditCard", &json!("4532015112830366")).unwrap().is_success());
    assert!(registry.validate("creditCard", &json!("1234567890123456")).unwrap().is_failure());
    assert!(registry.validate("required", &json!(null)).unwrap().is_failure());
    assert!(registry.validate("requiredCheckboxGroup", &json!({"a": true})).unwrap().is_success());
}

#[test]
fn test_registered_composite() {
    let registry = ValidatorRegistry::with_builtins();
    registry
        .register(
            "username",
            Validators::compose(vec![
                registry.get("noWhitespace").unwrap(),
                Validators::min_length(3).shared(),
            ]),
        )
        .unwrap();

    let errors = unwrap_failure(registry.validate("username", &json!("a ")).unwrap());
    assert_eq!(errors.to_json(), json!({
        "whitespace": true,
        "minlength": {"requiredLength": 3, "actualLength": 2}
    }));
}

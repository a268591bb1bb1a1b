//! Text format validators.
//!
//! Each variant of [`FormatValidator`] checks the textual form of a value and
//! reports a bare `true` payload under its own kind. Empty input passes;
//! values with no textual form (arrays, objects) fail.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::error::{ErrorKind, ValidationErrors};
use crate::value::{as_text, is_empty_input};
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone number pattern is valid")
});

/// A single-purpose text format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatValidator {
    /// No Unicode whitespace anywhere in the value.
    NoWhitespace,
    /// A strict `local@domain.tld` address.
    Email,
    /// A North American style phone number, spaces ignored.
    PhoneNumber,
    /// An absolute URL with a scheme and a host.
    Url,
    /// A card number passing the Luhn checksum, spaces ignored.
    CreditCard,
    /// Well-formed JSON text.
    Json,
}

impl FormatValidator {
    /// Returns the error kind this validator reports.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatValidator::NoWhitespace => ErrorKind::Whitespace,
            FormatValidator::Email => ErrorKind::Email,
            FormatValidator::PhoneNumber => ErrorKind::PhoneNumber,
            FormatValidator::Url => ErrorKind::Url,
            FormatValidator::CreditCard => ErrorKind::CreditCard,
            FormatValidator::Json => ErrorKind::Json,
        }
    }

    /// Returns true if the text satisfies this format.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            FormatValidator::NoWhitespace => !text.chars().any(char::is_whitespace),
            FormatValidator::Email => EMAIL.is_match(text),
            FormatValidator::PhoneNumber => PHONE_NUMBER.is_match(&strip_whitespace(text)),
            FormatValidator::Url => Url::parse(text).is_ok_and(|url| url.has_host()),
            FormatValidator::CreditCard => is_card_number(&strip_whitespace(text)),
            FormatValidator::Json => serde_json::from_str::<Value>(text).is_ok(),
        }
    }
}

impl Validator for FormatValidator {
    fn validate(&self, value: &Value, _ctx: &FieldContext<'_>) -> ValidationResult<()> {
        if is_empty_input(value) {
            return check(None);
        }
        let valid = as_text(value).is_some_and(|text| self.accepts(&text));
        check((!valid).then(|| ValidationErrors::flag(self.kind())))
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_card_number(digits: &str) -> bool {
    !digits.is_empty() && luhn_checksum_valid(digits)
}

/// Luhn checksum over a string of decimal digits.
///
/// Every second digit from the right is doubled, with 9 subtracted when the
/// result exceeds 9. The number is valid when the digit sum is a multiple of
/// 10. Any non-digit character makes the number invalid.
pub fn luhn_checksum_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
    }
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passes(validator: FormatValidator, value: Value) -> bool {
        validator
            .validate(&value, &FieldContext::detached())
            .is_success()
    }

    #[test]
    fn test_no_whitespace() {
        assert!(passes(FormatValidator::NoWhitespace, json!("validInput")));
        assert!(!passes(FormatValidator::NoWhitespace, json!("invalid input")));
        assert!(!passes(FormatValidator::NoWhitespace, json!("tab\there")));
        assert!(!passes(FormatValidator::NoWhitespace, json!("nbsp\u{00A0}")));
        assert!(passes(FormatValidator::NoWhitespace, json!("")));
    }

    #[test]
    fn test_email() {
        assert!(passes(FormatValidator::Email, json!("test@example.com")));
        assert!(passes(FormatValidator::Email, json!("first.last+tag@sub.example.org")));
        assert!(!passes(FormatValidator::Email, json!("invalid-email")));
        assert!(!passes(FormatValidator::Email, json!("a@b.c")));
        assert!(!passes(FormatValidator::Email, json!("a b@example.com")));
    }

    #[test]
    fn test_phone_number() {
        assert!(passes(FormatValidator::PhoneNumber, json!("123-456-7890")));
        assert!(passes(FormatValidator::PhoneNumber, json!("(555) 123-4567")));
        assert!(passes(FormatValidator::PhoneNumber, json!("+555.123.456789")));
        assert!(passes(FormatValidator::PhoneNumber, json!("555 123 4567")));
        assert!(!passes(FormatValidator::PhoneNumber, json!("123")));
        assert!(!passes(FormatValidator::PhoneNumber, json!("555-123-45")));
    }

    #[test]
    fn test_url() {
        assert!(passes(FormatValidator::Url, json!("https://example.com")));
        assert!(passes(FormatValidator::Url, json!("ftp://files.example.com/a.txt")));
        assert!(!passes(FormatValidator::Url, json!("not-a-url")));
        assert!(!passes(FormatValidator::Url, json!("example.com/path")));
    }

    #[test]
    fn test_credit_card() {
        assert!(passes(FormatValidator::CreditCard, json!("4532015112830366")));
        assert!(passes(FormatValidator::CreditCard, json!("4532 0151 1283 0366")));
        assert!(!passes(FormatValidator::CreditCard, json!("1234567890123456")));
        assert!(!passes(FormatValidator::CreditCard, json!("4532-0151-1283-0366")));
        assert!(!passes(FormatValidator::CreditCard, json!("   ")));
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_checksum_valid("79927398713"));
        assert!(!luhn_checksum_valid("79927398710"));
        assert!(luhn_checksum_valid("0"));
    }

    #[test]
    fn test_luhn_rejects_non_digits() {
        assert!(!luhn_checksum_valid("4532 0151"));
        assert!(!luhn_checksum_valid("4532-0151-1283-0366"));
        assert!(!luhn_checksum_valid("45320151128303６６"));
        assert!(!luhn_checksum_valid("!"));
    }

    #[test]
    fn test_json() {
        assert!(passes(FormatValidator::Json, json!(r#"{"key": "value"}"#)));
        assert!(passes(FormatValidator::Json, json!("[1, 2, 3]")));
        assert!(!passes(FormatValidator::Json, json!("{invalid json}")));
    }

    #[test]
    fn test_empty_passes_every_format() {
        for validator in [
            FormatValidator::NoWhitespace,
            FormatValidator::Email,
            FormatValidator::PhoneNumber,
            FormatValidator::Url,
            FormatValidator::CreditCard,
            FormatValidator::Json,
        ] {
            assert!(passes(validator, json!("")));
            assert!(passes(validator, json!(null)));
        }
    }

    #[test]
    fn test_structured_values_fail() {
        assert!(!passes(FormatValidator::Email, json!({"email": "a@b.com"})));
        assert!(!passes(FormatValidator::Json, json!([1, 2])));
    }

    #[test]
    fn test_failure_payload() {
        let errors = FormatValidator::CreditCard
            .errors(&json!("1234567890123456"), &FieldContext::detached())
            .unwrap();
        assert_eq!(errors.to_json(), json!({"creditCard": true}));
    }
}

//! Error kinds and their payloads.
//!
//! Every failed validator reports one [`ErrorKind`] together with an
//! [`ErrorPayload`] describing why it failed. Payload shapes differ per kind,
//! so the payload is a tagged union rather than an open map.

use std::fmt::{self, Display};

use serde_json::{json, Map, Value};

use crate::value::{display_value, format_number, number_to_json};

/// The name of a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Required,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    Email,
    Whitespace,
    PhoneNumber,
    Url,
    CreditCard,
    Json,
    StrongPassword,
    MatchControl,
    Range,
    MinAge,
    RequiredCheckboxGroup,
    /// A kind reported by a user-defined validator.
    Custom(String),
}

impl ErrorKind {
    /// Known kinds in message resolution order.
    ///
    /// When a field carries several errors at once, the first kind in this
    /// list that is present decides the message.
    pub const PRIORITY: [ErrorKind; 17] = [
        ErrorKind::Required,
        ErrorKind::MinLength,
        ErrorKind::MaxLength,
        ErrorKind::Min,
        ErrorKind::Max,
        ErrorKind::Pattern,
        ErrorKind::Email,
        ErrorKind::Whitespace,
        ErrorKind::PhoneNumber,
        ErrorKind::Url,
        ErrorKind::CreditCard,
        ErrorKind::Json,
        ErrorKind::StrongPassword,
        ErrorKind::MatchControl,
        ErrorKind::Range,
        ErrorKind::MinAge,
        ErrorKind::RequiredCheckboxGroup,
    ];

    /// Returns the conventional key for this kind, e.g. `phoneNumber`.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::MinLength => "minlength",
            ErrorKind::MaxLength => "maxlength",
            ErrorKind::Min => "min",
            ErrorKind::Max => "max",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Email => "email",
            ErrorKind::Whitespace => "whitespace",
            ErrorKind::PhoneNumber => "phoneNumber",
            ErrorKind::Url => "url",
            ErrorKind::CreditCard => "creditCard",
            ErrorKind::Json => "json",
            ErrorKind::StrongPassword => "strongPassword",
            ErrorKind::MatchControl => "matchControl",
            ErrorKind::Range => "range",
            ErrorKind::MinAge => "minAge",
            ErrorKind::RequiredCheckboxGroup => "requiredCheckboxGroup",
            ErrorKind::Custom(name) => name,
        }
    }

    /// Parses a kind from its key. Unknown keys become [`ErrorKind::Custom`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_name("minAge"), ErrorKind::MinAge);
    /// assert_eq!(
    ///     ErrorKind::from_name("uniqueUsername"),
    ///     ErrorKind::Custom("uniqueUsername".to_string())
    /// );
    /// ```
    pub fn from_name(name: &str) -> Self {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or_else(|| ErrorKind::Custom(name.to_string()))
    }

    /// Returns the position of this kind in [`ErrorKind::PRIORITY`].
    ///
    /// Custom kinds have no fixed priority.
    pub fn priority(&self) -> Option<usize> {
        Self::PRIORITY.iter().position(|kind| kind == self)
    }

    /// Returns true for kinds outside the built-in catalog.
    pub fn is_custom(&self) -> bool {
        matches!(self, ErrorKind::Custom(_))
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unmet strong-password rules. A flag is set only when its rule is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordIssues {
    /// Fewer than 8 characters.
    pub min_length: bool,
    /// No ASCII uppercase letter.
    pub uppercase: bool,
    /// No ASCII lowercase letter.
    pub lowercase: bool,
    /// No ASCII digit.
    pub number: bool,
    /// None of `!@#$%^&*(),.?":{}|<>`.
    pub special_char: bool,
}

impl PasswordIssues {
    /// Returns true when every rule is satisfied.
    pub fn is_empty(&self) -> bool {
        !(self.min_length || self.uppercase || self.lowercase || self.number || self.special_char)
    }

    /// Describes the unmet rules in fixed order: length, uppercase, lowercase,
    /// number, special character.
    pub fn unmet_requirements(&self) -> Vec<&'static str> {
        [
            (self.min_length, "at least 8 characters"),
            (self.uppercase, "an uppercase letter"),
            (self.lowercase, "a lowercase letter"),
            (self.number, "a number"),
            (self.special_char, "a special character"),
        ]
        .into_iter()
        .filter_map(|(unmet, text)| unmet.then_some(text))
        .collect()
    }

    fn flags(&self) -> [(&'static str, bool); 5] {
        [
            ("minLength", self.min_length),
            ("uppercase", self.uppercase),
            ("lowercase", self.lowercase),
            ("number", self.number),
            ("specialChar", self.special_char),
        ]
    }

    pub(crate) fn from_object(obj: &Map<String, Value>) -> Self {
        let set = |key: &str| obj.get(key) == Some(&Value::Bool(true));
        Self {
            min_length: set("minLength"),
            uppercase: set("uppercase"),
            lowercase: set("lowercase"),
            number: set("number"),
            special_char: set("specialChar"),
        }
    }
}

/// The observed value in a `range` failure.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeActual {
    /// The value read as a number and fell outside the range.
    Parsed(f64),
    /// The value could not be read as a number.
    Raw(Value),
}

/// Kind-specific detail attached to a validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// A bare failure marker (`true`).
    Flag,
    Length {
        required_length: usize,
        actual_length: usize,
    },
    Min {
        min: f64,
        actual: f64,
    },
    Max {
        max: f64,
        actual: f64,
    },
    Pattern {
        required_pattern: String,
        actual_value: String,
    },
    Password(PasswordIssues),
    Control {
        control_name: String,
    },
    Range {
        min: f64,
        max: f64,
        actual: RangeActual,
    },
    Age {
        required_age: u32,
        /// `None` when the value could not be read as a date.
        actual_age: Option<i64>,
    },
    CheckboxGroup {
        min_required: usize,
        /// `None` when the group had no value at all.
        actual: Option<usize>,
    },
    /// Free-form detail, used by custom validators and by payloads that do
    /// not match their kind's usual shape.
    Detail(Value),
}

impl ErrorPayload {
    /// Looks up a named template parameter, rendered for display.
    ///
    /// Parameter names follow the conventional payload keys, e.g.
    /// `requiredLength` or `controlName`. Returns `None` when the payload has
    /// no such parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        match (self, name) {
            (ErrorPayload::Length { required_length, .. }, "requiredLength") => {
                Some(required_length.to_string())
            }
            (ErrorPayload::Length { actual_length, .. }, "actualLength") => {
                Some(actual_length.to_string())
            }
            (ErrorPayload::Min { min, .. }, "min") => Some(format_number(*min)),
            (ErrorPayload::Max { max, .. }, "max") => Some(format_number(*max)),
            (ErrorPayload::Min { actual, .. } | ErrorPayload::Max { actual, .. }, "actual") => {
                Some(format_number(*actual))
            }
            (ErrorPayload::Pattern { required_pattern, .. }, "requiredPattern") => {
                Some(required_pattern.clone())
            }
            (ErrorPayload::Pattern { actual_value, .. }, "actualValue") => {
                Some(actual_value.clone())
            }
            (ErrorPayload::Password(issues), key) => issues
                .flags()
                .into_iter()
                .find(|(flag, set)| *flag == key && *set)
                .map(|_| "true".to_string()),
            (ErrorPayload::Control { control_name }, "controlName") => Some(control_name.clone()),
            (ErrorPayload::Range { min, .. }, "min") => Some(format_number(*min)),
            (ErrorPayload::Range { max, .. }, "max") => Some(format_number(*max)),
            (ErrorPayload::Range { actual, .. }, "actual") => Some(match actual {
                RangeActual::Parsed(n) => format_number(*n),
                RangeActual::Raw(raw) => display_value(raw),
            }),
            (ErrorPayload::Age { required_age, .. }, "requiredAge") => {
                Some(required_age.to_string())
            }
            (ErrorPayload::Age { actual_age, .. }, "actualAge") => {
                actual_age.map(|age| age.to_string())
            }
            (ErrorPayload::CheckboxGroup { min_required, .. }, "minRequired") => {
                Some(min_required.to_string())
            }
            (ErrorPayload::CheckboxGroup { actual, .. }, "actual") => {
                actual.map(|count| count.to_string())
            }
            (ErrorPayload::Detail(Value::Object(obj)), key) => obj.get(key).map(display_value),
            _ => None,
        }
    }

    /// Converts the payload to its conventional JSON shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{ErrorPayload, RangeActual};
    /// use serde_json::json;
    ///
    /// let payload = ErrorPayload::Range {
    ///     min: 1.0,
    ///     max: 10.0,
    ///     actual: RangeActual::Parsed(15.0),
    /// };
    /// assert_eq!(payload.to_json(), json!({"min": 1, "max": 10, "actual": 15}));
    /// ```
    pub fn to_json(&self) -> Value {
        match self {
            ErrorPayload::Flag => Value::Bool(true),
            ErrorPayload::Length {
                required_length,
                actual_length,
            } => json!({"requiredLength": required_length, "actualLength": actual_length}),
            ErrorPayload::Min { min, actual } => {
                json!({"min": number_to_json(*min), "actual": number_to_json(*actual)})
            }
            ErrorPayload::Max { max, actual } => {
                json!({"max": number_to_json(*max), "actual": number_to_json(*actual)})
            }
            ErrorPayload::Pattern {
                required_pattern,
                actual_value,
            } => json!({"requiredPattern": required_pattern, "actualValue": actual_value}),
            ErrorPayload::Password(issues) => Value::Object(
                issues
                    .flags()
                    .into_iter()
                    .filter(|(_, set)| *set)
                    .map(|(key, _)| (key.to_string(), Value::Bool(true)))
                    .collect(),
            ),
            ErrorPayload::Control { control_name } => json!({"controlName": control_name}),
            ErrorPayload::Range { min, max, actual } => json!({
                "min": number_to_json(*min),
                "max": number_to_json(*max),
                "actual": match actual {
                    RangeActual::Parsed(n) => number_to_json(*n),
                    RangeActual::Raw(raw) => raw.clone(),
                },
            }),
            ErrorPayload::Age {
                required_age,
                actual_age,
            } => json!({"requiredAge": required_age, "actualAge": actual_age}),
            ErrorPayload::CheckboxGroup {
                min_required,
                actual,
            } => {
                let mut obj = Map::new();
                obj.insert("minRequired".to_string(), json!(min_required));
                if let Some(count) = actual {
                    obj.insert("actual".to_string(), json!(count));
                }
                Value::Object(obj)
            }
            ErrorPayload::Detail(value) => value.clone(),
        }
    }

    /// Reads a payload for `kind` from its JSON shape.
    ///
    /// Shapes that do not match the kind's usual payload are kept verbatim as
    /// [`ErrorPayload::Detail`].
    pub fn from_json(kind: &ErrorKind, value: &Value) -> Self {
        Self::typed_from_json(kind, value).unwrap_or_else(|| ErrorPayload::Detail(value.clone()))
    }

    fn typed_from_json(kind: &ErrorKind, value: &Value) -> Option<Self> {
        let usize_at = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_u64)
                .and_then(|n| usize::try_from(n).ok())
        };
        let f64_at = |key: &str| value.get(key).and_then(Value::as_f64);

        match kind {
            ErrorKind::Required
            | ErrorKind::Email
            | ErrorKind::Whitespace
            | ErrorKind::PhoneNumber
            | ErrorKind::Url
            | ErrorKind::CreditCard
            | ErrorKind::Json => (value == &Value::Bool(true)).then_some(ErrorPayload::Flag),
            ErrorKind::MinLength | ErrorKind::MaxLength => Some(ErrorPayload::Length {
                required_length: usize_at("requiredLength")?,
                actual_length: usize_at("actualLength")?,
            }),
            ErrorKind::Min => Some(ErrorPayload::Min {
                min: f64_at("min")?,
                actual: f64_at("actual")?,
            }),
            ErrorKind::Max => Some(ErrorPayload::Max {
                max: f64_at("max")?,
                actual: f64_at("actual")?,
            }),
            ErrorKind::Pattern => Some(ErrorPayload::Pattern {
                required_pattern: value.get("requiredPattern")?.as_str()?.to_string(),
                actual_value: value.get("actualValue")?.as_str()?.to_string(),
            }),
            ErrorKind::StrongPassword => {
                let issues = PasswordIssues::from_object(value.as_object()?);
                (!issues.is_empty()).then_some(ErrorPayload::Password(issues))
            }
            ErrorKind::MatchControl => Some(ErrorPayload::Control {
                control_name: value.get("controlName")?.as_str()?.to_string(),
            }),
            ErrorKind::Range => {
                let actual = value.get("actual")?;
                Some(ErrorPayload::Range {
                    min: f64_at("min")?,
                    max: f64_at("max")?,
                    actual: match actual.as_f64() {
                        Some(n) => RangeActual::Parsed(n),
                        None => RangeActual::Raw(actual.clone()),
                    },
                })
            }
            ErrorKind::MinAge => Some(ErrorPayload::Age {
                required_age: value
                    .get("requiredAge")?
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())?,
                actual_age: value.get("actualAge").and_then(Value::as_i64),
            }),
            ErrorKind::RequiredCheckboxGroup => Some(ErrorPayload::CheckboxGroup {
                min_required: usize_at("minRequired")?,
                actual: usize_at("actual"),
            }),
            ErrorKind::Custom(_) => (value == &Value::Bool(true)).then_some(ErrorPayload::Flag),
        }
    }
}

//! Minimum age validation for birth dates.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::{ErrorKind, ErrorPayload, ValidationErrors};
use crate::value::is_empty_input;
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// Requires a birth date at least `min_age` whole years before today.
///
/// Accepted values are `YYYY-MM-DD`, RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`,
/// `MM/DD/YYYY`, and numbers taken as milliseconds since the Unix epoch. A value
/// that is not a date fails with no `actualAge`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let adult = Validators::min_age_on(18, today);
/// let ctx = FieldContext::detached();
///
/// assert!(adult.errors(&json!("2006-06-15"), &ctx).is_none());
/// assert_eq!(
///     adult.errors(&json!("2006-06-16"), &ctx).unwrap().to_json(),
///     json!({"minAge": {"requiredAge": 18, "actualAge": 17}})
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinAge {
    min_age: u32,
    today: Option<NaiveDate>,
}

impl MinAge {
    /// Creates a validator measuring age against the local current date.
    pub fn new(min_age: u32) -> Self {
        Self {
            min_age,
            today: None,
        }
    }

    /// Creates a validator measuring age against a fixed date.
    pub fn on(min_age: u32, today: NaiveDate) -> Self {
        Self {
            min_age,
            today: Some(today),
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Validator for MinAge {
    fn validate(&self, value: &Value, _ctx: &FieldContext<'_>) -> ValidationResult<()> {
        if is_empty_input(value) {
            return check(None);
        }
        let actual_age = parse_date(value).map(|birth| age_on(birth, self.today()));
        let old_enough = actual_age.is_some_and(|age| age >= i64::from(self.min_age));
        check((!old_enough).then(|| {
            ValidationErrors::single(
                ErrorKind::MinAge,
                ErrorPayload::Age {
                    required_age: self.min_age,
                    actual_age,
                },
            )
        }))
    }
}

/// Whole calendar years from `birth` to `today`.
///
/// The year difference is reduced by one when today's month and day fall
/// before the birth month and day.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year()) - i64::from(birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            DateTime::from_timestamp_millis(n.as_i64()?).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok())
}

//! Validator combinators.
//!
//! - [`Compose`]: runs several validators and merges their errors
//! - [`CustomValidator`]: adapts a closure into a validator with its own kind

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::prelude::*;

use crate::error::{ErrorKind, ErrorPayload, ValidationErrors};
use crate::ValidationResult;

use super::traits::{check, FieldContext, Validator};

/// Runs every inner validator and merges all failures.
///
/// Validators run in order. Each one sees the same value and context and none
/// depends on another having run.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let username = Validators::compose(vec![
///     Validators::required().shared(),
///     Validators::min_length(3).shared(),
///     Validators::no_whitespace().shared(),
/// ]);
///
/// let errors = username.errors(&json!("a b"), &FieldContext::detached()).unwrap();
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Compose {
    validators: Vec<Arc<dyn Validator>>,
}

impl Compose {
    /// Creates a composite of the given validators.
    pub fn new(validators: Vec<Arc<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// Returns the number of inner validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if there are no inner validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for Compose {
    fn validate(&self, value: &Value, ctx: &FieldContext<'_>) -> ValidationResult<()> {
        check(
            self.validators
                .iter()
                .filter_map(|validator| validator.errors(value, ctx))
                .reduce(Semigroup::combine),
        )
    }
}

impl fmt::Debug for Compose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Type alias for the check function wrapped by [`CustomValidator`].
type CheckFn = Arc<dyn Fn(&Value, &FieldContext<'_>) -> Option<ErrorPayload> + Send + Sync>;

/// A validator defined by a closure.
///
/// The closure returns the failure payload, or `None` when the value is
/// valid. Failures are reported under the validator's kind.
///
/// # Example
///
/// ```rust
/// use fieldguard::{ErrorPayload, FieldContext, Validator, Validators};
/// use serde_json::json;
///
/// let not_admin = Validators::custom("reservedName", |value, _ctx| {
///     (value == &json!("admin")).then_some(ErrorPayload::Flag)
/// });
///
/// let errors = not_admin.errors(&json!("admin"), &FieldContext::detached()).unwrap();
/// assert_eq!(errors.to_json(), json!({"reservedName": true}));
/// ```
#[derive(Clone)]
pub struct CustomValidator {
    kind: ErrorKind,
    check: CheckFn,
}

impl CustomValidator {
    /// Creates a custom validator reporting under `name`.
    ///
    /// A name matching a built-in kind (e.g. `"required"`) reports as that
    /// kind.
    pub fn new<F>(name: &str, check: F) -> Self
    where
        F: Fn(&Value, &FieldContext<'_>) -> Option<ErrorPayload> + Send + Sync + 'static,
    {
        Self {
            kind: ErrorKind::from_name(name),
            check: Arc::new(check),
        }
    }

    /// Returns the kind this validator reports.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl Validator for CustomValidator {
    fn validate(&self, value: &Value, ctx: &FieldContext<'_>) -> ValidationResult<()> {
        check((self.check)(value, ctx).map(|payload| ValidationErrors::single(self.kind.clone(), payload)))
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidator")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{BuiltinValidator, FormatValidator};
    use serde_json::json;

    #[test]
    fn test_compose_merges_all_failures() {
        let composite = Compose::new(vec![
            BuiltinValidator::MinLength(10).shared(),
            FormatValidator::NoWhitespace.shared(),
            FormatValidator::Email.shared(),
        ]);

        let errors = composite
            .errors(&json!("a b"), &FieldContext::detached())
            .unwrap();
        let kinds: Vec<_> = errors.kinds().map(|k| k.as_str()).collect();
        assert_eq!(kinds, vec!["minlength", "whitespace", "email"]);
    }

    #[test]
    fn test_compose_passes_when_all_pass() {
        let composite = Compose::new(vec![
            BuiltinValidator::Required.shared(),
            FormatValidator::Email.shared(),
        ]);
        assert!(composite
            .validate(&json!("test@example.com"), &FieldContext::detached())
            .is_success());
    }

    #[test]
    fn test_empty_compose_passes() {
        let composite = Compose::default();
        assert!(composite.is_empty());
        assert!(composite
            .validate(&json!(null), &FieldContext::detached())
            .is_success());
    }

    #[test]
    fn test_custom_known_name_maps_to_builtin_kind() {
        let validator = CustomValidator::new("required", |value, _| {
            value.is_null().then_some(ErrorPayload::Flag)
        });
        assert_eq!(validator.kind(), &ErrorKind::Required);
    }

    #[test]
    fn test_custom_reads_siblings() {
        let form = json!({"start": 5});
        let ctx = FieldContext::with_siblings(form.as_object().unwrap());
        let after_start = CustomValidator::new("afterStart", |value, ctx| {
            let start = ctx.sibling("start")?.as_f64()?;
            let end = value.as_f64()?;
            (end <= start).then(|| ErrorPayload::Detail(json!({"start": start})))
        });

        assert!(after_start.errors(&json!(10), &ctx).is_none());
        assert_eq!(
            after_start.errors(&json!(2), &ctx).unwrap().to_json(),
            json!({"afterStart": {"start": 5.0}})
        );
    }
}

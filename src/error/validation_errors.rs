//! The accumulated errors of one field.
//!
//! [`ValidationErrors`] maps each failed [`ErrorKind`] to its payload. It is
//! never empty: a field with no failures has no `ValidationErrors` at all.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use super::kind::{ErrorKind, ErrorPayload};

/// A non-empty mapping from error kind to payload.
///
/// Several validators attached to one field each contribute their own kinds;
/// their outputs are merged with [`Semigroup::combine`]. Kinds keep the order
/// in which they were first reported. Merging a kind that is already present
/// keeps its position and takes the newer payload.
///
/// # Example
///
/// ```rust
/// use fieldguard::{ErrorKind, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let required = ValidationErrors::flag(ErrorKind::Required);
/// let email = ValidationErrors::flag(ErrorKind::Email);
///
/// let merged = required.combine(email);
/// assert_eq!(merged.len(), 2);
/// assert!(merged.contains(&ErrorKind::Required));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(IndexMap<ErrorKind, ErrorPayload>);

impl ValidationErrors {
    /// Creates errors holding a single kind.
    pub fn single(kind: ErrorKind, payload: ErrorPayload) -> Self {
        let mut map = IndexMap::new();
        map.insert(kind, payload);
        Self(map)
    }

    /// Creates errors holding a single kind with a bare `true` payload.
    pub fn flag(kind: ErrorKind) -> Self {
        Self::single(kind, ErrorPayload::Flag)
    }

    /// Builds errors from entries, or `None` when there are none.
    pub fn from_entries<I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (ErrorKind, ErrorPayload)>,
    {
        let map: IndexMap<_, _> = entries.into_iter().collect();
        (!map.is_empty()).then_some(Self(map))
    }

    /// Adds or replaces the payload for a kind.
    pub fn insert(&mut self, kind: ErrorKind, payload: ErrorPayload) {
        self.0.insert(kind, payload);
    }

    /// Returns the payload reported for a kind.
    pub fn get(&self, kind: &ErrorKind) -> Option<&ErrorPayload> {
        self.0.get(kind)
    }

    /// Returns the stored kind and payload for a kind.
    pub fn get_entry(&self, kind: &ErrorKind) -> Option<(&ErrorKind, &ErrorPayload)> {
        self.0.get_key_value(kind)
    }

    /// Returns the payload reported under a key such as `"minlength"`.
    pub fn get_by_name(&self, name: &str) -> Option<&ErrorPayload> {
        self.0.get(&ErrorKind::from_name(name))
    }

    /// Returns true if the kind was reported.
    pub fn contains(&self, kind: &ErrorKind) -> bool {
        self.0.contains_key(kind)
    }

    /// Returns the number of distinct kinds.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; `ValidationErrors` is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates kinds and payloads in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&ErrorKind, &ErrorPayload)> {
        self.0.iter()
    }

    /// Iterates the reported kinds in report order.
    pub fn kinds(&self) -> impl Iterator<Item = &ErrorKind> {
        self.0.keys()
    }

    /// Returns the reported kind that wins message resolution.
    ///
    /// Built-in kinds are ranked by [`ErrorKind::PRIORITY`]; if none is
    /// present, the first custom kind reported wins.
    pub fn highest_priority(&self) -> (&ErrorKind, &ErrorPayload) {
        self.0
            .iter()
            .min_by_key(|(kind, _)| kind.priority().unwrap_or(usize::MAX))
            .expect("ValidationErrors is never empty")
    }

    /// Converts to the conventional `{"kind": payload}` JSON object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{ErrorKind, ValidationErrors};
    /// use serde_json::json;
    ///
    /// let errors = ValidationErrors::flag(ErrorKind::CreditCard);
    /// assert_eq!(errors.to_json(), json!({"creditCard": true}));
    /// ```
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(kind, payload)| (kind.to_string(), payload.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Reads errors from a `{"kind": payload}` JSON object.
    ///
    /// Returns `None` for `null`, an empty object, or any non-object value.
    /// Payloads whose shape does not match their kind are kept as
    /// [`ErrorPayload::Detail`].
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Self::from_entries(obj.iter().map(|(key, payload)| {
            let kind = ErrorKind::from_name(key);
            let payload = ErrorPayload::from_json(&kind, payload);
            (kind, payload)
        }))
    }
}

impl Semigroup for ValidationErrors {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.kinds().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = (ErrorKind, ErrorPayload);
    type IntoIter = indexmap::map::IntoIter<ErrorKind, ErrorPayload>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// Validators run on any thread, so their errors must cross thread boundaries.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

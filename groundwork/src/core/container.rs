//! Outcome paired with a strongly typed payload.

use super::Outcome;
use crate::errors::GroundworkError;
use crate::utils::Timestamp;
use std::any::{type_name, Any};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

/// Types that can report whether they carry any content.
///
/// The payload-presence probe on [`OutcomeContainer`] must not consume the
/// payload, so the probe is restricted to already-materialized values:
/// scalars always have content, sequences and maps have content when they
/// are non-empty. There is no lazy-iterator variant.
pub trait HasContent {
    /// Returns true if the value carries at least one element of content.
    fn has_content(&self) -> bool {
        true
    }
}

macro_rules! impl_scalar_content {
    ($($ty:ty),* $(,)?) => {
        $(impl HasContent for $ty {})*
    };
}

impl_scalar_content!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Uuid,
);

impl HasContent for String {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl HasContent for &str {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> HasContent for Vec<T> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> HasContent for HashMap<K, V, S> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> HasContent for BTreeMap<K, V> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl HasContent for serde_json::Value {
    fn has_content(&self) -> bool {
        match self {
            Self::Null => false,
            Self::String(s) => !s.is_empty(),
            Self::Array(a) => !a.is_empty(),
            Self::Object(o) => !o.is_empty(),
            Self::Bool(_) | Self::Number(_) => true,
        }
    }
}

/// An [`Outcome`] paired with a strongly typed payload.
///
/// The outcome is always present; the absent-outcome condition of looser
/// type systems is unrepresentable here. The payload may be absent, and a
/// container is freely convertible to a container of another payload type
/// through a runtime-checked [`cast`](Self::cast).
#[derive(Debug, Clone)]
pub struct OutcomeContainer<T> {
    outcome: Outcome,
    payload: Option<T>,
}

impl<T> OutcomeContainer<T> {
    /// Creates a container holding a payload.
    #[must_use]
    pub fn new(outcome: Outcome, payload: T) -> Self {
        Self {
            outcome,
            payload: Some(payload),
        }
    }

    /// Creates a container with no payload.
    #[must_use]
    pub fn empty(outcome: Outcome) -> Self {
        Self {
            outcome,
            payload: None,
        }
    }

    /// Creates a failure container from a captured fault, payload absent.
    #[must_use]
    pub fn from_error(err: impl Into<anyhow::Error>) -> Self {
        Self::empty(Outcome::from_error(err))
    }

    /// Returns the wrapped outcome.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns true if the outcome indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Returns the outcome's severity.
    #[must_use]
    pub fn severity(&self) -> crate::core::Severity {
        self.outcome.severity()
    }

    /// Resolves the outcome's message.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.outcome.message()
    }

    /// Returns the outcome's unique id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.outcome.id()
    }

    /// Returns the outcome's UTC capture instant.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.outcome.timestamp()
    }

    /// Converts a failure outcome back into a raised error.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::Failed`] when the outcome is not a success.
    pub fn raise(&self) -> Result<(), GroundworkError> {
        self.outcome.raise()
    }

    /// Returns the payload, if present.
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Returns true if a payload is present and carries content.
    ///
    /// For sequence-like payloads this requires at least one element; the
    /// probe never consumes the payload.
    #[must_use]
    pub fn has_payload(&self) -> bool
    where
        T: HasContent,
    {
        self.payload.as_ref().is_some_and(HasContent::has_content)
    }

    /// Iterates the payload: an empty sequence when absent, exactly one
    /// element otherwise. Lets call sites consume scalar and collection
    /// results uniformly.
    pub fn iter(&self) -> std::option::Iter<'_, T> {
        self.payload.iter()
    }

    /// Attempts a runtime-checked conversion of the payload to `U`.
    ///
    /// The wrapped outcome is preserved unchanged. An absent payload casts
    /// to an absent payload of the target type.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::InvalidCast`] when the payload is not a
    /// value of type `U`.
    pub fn cast<U: Any>(self) -> Result<OutcomeContainer<U>, GroundworkError>
    where
        T: Any,
    {
        let Self { outcome, payload } = self;
        match payload {
            None => Ok(OutcomeContainer {
                outcome,
                payload: None,
            }),
            Some(value) => {
                let boxed: Box<dyn Any> = Box::new(value);
                match boxed.downcast::<U>() {
                    Ok(target) => Ok(OutcomeContainer {
                        outcome,
                        payload: Some(*target),
                    }),
                    Err(_) => Err(GroundworkError::InvalidCast {
                        from: type_name::<T>(),
                        to: type_name::<U>(),
                    }),
                }
            }
        }
    }

    /// Decomposes the container into its outcome and payload.
    #[must_use]
    pub fn into_parts(self) -> (Outcome, Option<T>) {
        (self.outcome, self.payload)
    }

    /// Labels the container with a key for pattern-matching callers.
    #[must_use]
    pub fn into_entry(self, key: impl Into<String>) -> (String, Self) {
        (key.into(), self)
    }

    /// Rebuilds a container from a labelled entry, discarding the label.
    #[must_use]
    pub fn from_entry(entry: (String, Self)) -> Self {
        entry.1
    }
}

impl<T> From<(Outcome, T)> for OutcomeContainer<T> {
    fn from((outcome, payload): (Outcome, T)) -> Self {
        Self::new(outcome, payload)
    }
}

impl<T> From<(Outcome, Option<T>)> for OutcomeContainer<T> {
    fn from((outcome, payload): (Outcome, Option<T>)) -> Self {
        Self { outcome, payload }
    }
}

impl<T> IntoIterator for OutcomeContainer<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.payload.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OutcomeContainer<T> {
    type Item = &'a T;
    type IntoIter = std::option::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.payload.iter()
    }
}

impl<T: fmt::Display> fmt::Display for OutcomeContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if let Some(payload) = &self.payload {
            write!(f, " => {payload}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_holds_payload() {
        let container = OutcomeContainer::new(Outcome::success(), 42_u32);
        assert!(container.is_success());
        assert_eq!(container.payload(), Some(&42));
        assert!(container.has_payload());
    }

    #[test]
    fn test_empty_has_no_payload() {
        let container = OutcomeContainer::<u32>::empty(Outcome::success());
        assert!(container.payload().is_none());
        assert!(!container.has_payload());
    }

    #[test]
    fn test_from_error_is_failure() {
        let container = OutcomeContainer::<u32>::from_error(anyhow::anyhow!("no connection"));
        assert!(!container.is_success());
        assert_eq!(container.message(), Some("no connection".to_string()));
        assert!(container.payload().is_none());
    }

    #[test]
    fn test_has_payload_empty_sequence() {
        let container = OutcomeContainer::new(Outcome::success(), Vec::<u32>::new());
        assert!(container.payload().is_some());
        assert!(!container.has_payload());

        let container = OutcomeContainer::new(Outcome::success(), vec![1, 2, 3]);
        assert!(container.has_payload());
    }

    #[test]
    fn test_has_payload_json_value() {
        let null = OutcomeContainer::new(Outcome::success(), serde_json::Value::Null);
        assert!(!null.has_payload());

        let rows = OutcomeContainer::new(Outcome::success(), serde_json::json!(["a"]));
        assert!(rows.has_payload());

        let empty_rows = OutcomeContainer::new(Outcome::success(), serde_json::json!([]));
        assert!(!empty_rows.has_payload());
    }

    #[test]
    fn test_probe_does_not_consume_payload() {
        let container = OutcomeContainer::new(Outcome::success(), vec![1]);
        assert!(container.has_payload());
        assert!(container.has_payload());
        assert_eq!(container.payload(), Some(&vec![1]));
    }

    #[test]
    fn test_cast_identity() {
        let container = OutcomeContainer::new(Outcome::success(), "done".to_string());
        let id = container.id();

        let same = container.cast::<String>().unwrap();
        assert_eq!(same.id(), id);
        assert_eq!(same.payload(), Some(&"done".to_string()));
    }

    #[test]
    fn test_cast_mismatch_fails() {
        let container = OutcomeContainer::new(Outcome::success(), 7_u32);
        let err = container.cast::<String>().unwrap_err();
        assert!(matches!(err, GroundworkError::InvalidCast { .. }));
    }

    #[test]
    fn test_cast_absent_payload_succeeds() {
        let container = OutcomeContainer::<u32>::empty(Outcome::success());
        let id = container.id();

        let cast = container.cast::<String>().unwrap();
        assert_eq!(cast.id(), id);
        assert!(cast.payload().is_none());
    }

    #[test]
    fn test_iteration_cardinality() {
        let absent = OutcomeContainer::<u32>::empty(Outcome::success());
        assert_eq!(absent.iter().count(), 0);

        let present = OutcomeContainer::new(Outcome::success(), 9_u32);
        assert_eq!(present.iter().count(), 1);
        assert_eq!(present.into_iter().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_parts_and_entry_views() {
        let container = OutcomeContainer::new(Outcome::success(), 3_u8);
        let (outcome, payload) = container.into_parts();
        assert!(outcome.is_success());
        assert_eq!(payload, Some(3));

        let rebuilt: OutcomeContainer<u8> = (outcome, payload).into();
        let (key, keyed) = rebuilt.into_entry("create_database");
        assert_eq!(key, "create_database");

        let back = OutcomeContainer::from_entry((key, keyed));
        assert_eq!(back.payload(), Some(&3));
    }

    #[test]
    fn test_raise_delegates_to_outcome() {
        let container = OutcomeContainer::<u32>::empty(Outcome::failure("nope"));
        assert!(container.raise().is_err());
        assert!(OutcomeContainer::<u32>::empty(Outcome::success())
            .raise()
            .is_ok());
    }
}

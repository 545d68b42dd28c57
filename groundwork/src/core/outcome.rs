//! Immutable record of how an operation concluded.

use super::Severity;
use crate::errors::GroundworkError;
use crate::utils::{format_iso8601, generate_uuid, now_utc, Timestamp};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// The conclusion of a single operation.
///
/// An `Outcome` is constructed exactly once when an operation finishes and
/// never mutated afterwards. It carries a unique id, a UTC capture instant,
/// a [`Severity`], an optional message, an optional captured fault, an
/// optional opaque payload handle, and an optional backward link to the
/// outcome that logically preceded it.
///
/// The backward chain is acyclic by construction: a link always points at an
/// already-frozen outcome, so no outcome can ever reach itself.
#[derive(Debug, Clone)]
pub struct Outcome {
    id: Uuid,
    severity: Severity,
    message: Option<String>,
    cause: Option<Arc<anyhow::Error>>,
    prior: Option<Arc<Outcome>>,
    payload: Option<serde_json::Value>,
    timestamp: Timestamp,
}

impl Outcome {
    /// Creates a new outcome with the given severity and nothing else.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self {
            id: generate_uuid(),
            severity,
            message: None,
            cause: None,
            prior: None,
            payload: None,
            timestamp: now_utc(),
        }
    }

    /// Creates a success outcome.
    #[must_use]
    pub fn success() -> Self {
        Self::new(Severity::success())
    }

    /// Creates a failure outcome with an explicit message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(Severity::failure()).with_message(message)
    }

    /// Creates a failure outcome from a captured fault.
    ///
    /// The severity is forced to failure and the outcome's message resolves
    /// to the fault's rendered message unless an explicit one is set.
    #[must_use]
    pub fn from_error(err: impl Into<anyhow::Error>) -> Self {
        Self::new(Severity::failure()).with_cause(err)
    }

    /// Sets an explicit message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Captures a causing fault.
    #[must_use]
    pub fn with_cause(mut self, err: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(Arc::new(err.into()));
        self
    }

    /// Links the outcome that logically preceded this one.
    #[must_use]
    pub fn with_prior(mut self, prior: Self) -> Self {
        self.prior = Some(Arc::new(prior));
        self
    }

    /// Attaches an opaque payload handle.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Returns the unique id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns true if the severity indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.severity.is_success()
    }

    /// Resolves the message.
    ///
    /// The explicit message wins; when none was set, the message derives
    /// from the captured fault's rendered message.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.cause.as_ref().map(|c| c.to_string()))
    }

    /// Returns the captured fault, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_deref()
    }

    /// Returns the outcome that logically preceded this one, if any.
    #[must_use]
    pub fn prior(&self) -> Option<&Self> {
        self.prior.as_deref()
    }

    /// Returns the opaque payload handle, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }

    /// Returns the UTC capture instant.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Walks the backward chain, nearest prior first.
    #[must_use]
    pub fn priors(&self) -> Priors<'_> {
        Priors {
            next: self.prior.as_deref(),
        }
    }

    /// Returns the number of outcomes linked behind this one.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        self.priors().count()
    }

    /// Converts a failure back into a raised error.
    ///
    /// No-op for a success outcome. For a failure, the returned error
    /// carries the resolved message; the original fault stays inspectable
    /// through [`cause`](Self::cause).
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::Failed`] when the outcome is not a success.
    pub fn raise(&self) -> Result<(), GroundworkError> {
        if self.is_success() {
            return Ok(());
        }
        Err(GroundworkError::Failed {
            message: self
                .message()
                .unwrap_or_else(|| "operation concluded with failure".to_string()),
        })
    }

    /// Converts the outcome to a diagnostic dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("id".to_string(), serde_json::json!(self.id.to_string()));
        map.insert(
            "timestamp".to_string(),
            serde_json::json!(format_iso8601(&self.timestamp)),
        );
        map.insert(
            "severity".to_string(),
            serde_json::json!(self.severity.to_string()),
        );
        if let Some(cause) = &self.cause {
            map.insert("error".to_string(), serde_json::json!(cause.to_string()));
        }
        if let Some(message) = &self.message {
            map.insert("message".to_string(), serde_json::json!(message));
        }
        if let Some(payload) = &self.payload {
            map.insert("payload".to_string(), payload.clone());
        }
        map
    }
}

impl fmt::Display for Outcome {
    /// Renders id, timestamp, severity, fault and message, in that order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}]",
            self.id,
            format_iso8601(&self.timestamp),
            self.severity
        )?;
        if let Some(cause) = &self.cause {
            write!(f, " [{cause}]")?;
        }
        if let Some(message) = &self.message {
            write!(f, " {message}")?;
        }
        Ok(())
    }
}

impl From<Severity> for Outcome {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

/// Iterator over the backward chain of an [`Outcome`].
#[derive(Debug)]
pub struct Priors<'a> {
    next: Option<&'a Outcome>,
}

impl<'a> Iterator for Priors<'a> {
    type Item = &'a Outcome;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.prior.as_deref();
        Some(current)
    }
}

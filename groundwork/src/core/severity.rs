//! Outcome severity classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an operation concluded: either it succeeded or it failed.
///
/// Failure is an explicit variant rather than an absence of flags, so a
/// severity value can never be ambiguous about which side it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The operation completed successfully.
    Success,
    /// The operation failed.
    Failure,
}

impl Default for Disposition {
    fn default() -> Self {
        Self::Failure
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// The severity of an [`Outcome`](super::Outcome).
///
/// A severity is a [`Disposition`] plus two orthogonal annotations:
/// `info` (supplementary, non-fatal) and `warning` (notable, non-fatal).
/// Both annotations combine freely with either disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Severity {
    /// Success or failure.
    pub disposition: Disposition,
    /// Whether supplementary information accompanies the outcome.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub info: bool,
    /// Whether something notable but non-fatal occurred.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub warning: bool,
}

impl Severity {
    /// Creates a success severity with no annotations.
    #[must_use]
    pub fn success() -> Self {
        Self {
            disposition: Disposition::Success,
            info: false,
            warning: false,
        }
    }

    /// Creates a failure severity with no annotations.
    #[must_use]
    pub fn failure() -> Self {
        Self {
            disposition: Disposition::Failure,
            info: false,
            warning: false,
        }
    }

    /// Adds the info annotation.
    #[must_use]
    pub fn with_info(mut self) -> Self {
        self.info = true;
        self
    }

    /// Adds the warning annotation.
    #[must_use]
    pub fn with_warning(mut self) -> Self {
        self.warning = true;
        self
    }

    /// Returns true if the disposition is [`Disposition::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.disposition == Disposition::Success
    }

    /// Returns true if the disposition is [`Disposition::Failure`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.disposition == Disposition::Failure
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.disposition)?;
        if self.info {
            write!(f, "+info")?;
        }
        if self.warning {
            write!(f, "+warning")?;
        }
        Ok(())
    }
}

//! Core outcome types.
//!
//! This module provides:
//! - Severity classification for concluded operations
//! - The immutable [`Outcome`] record
//! - [`OutcomeContainer`] pairing an outcome with a typed payload

mod container;
mod outcome;
mod severity;

pub use container::{HasContent, OutcomeContainer};
pub use outcome::{Outcome, Priors};
pub use severity::{Disposition, Severity};

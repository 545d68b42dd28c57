//! # Groundwork
//!
//! Outcome propagation and fail-fast installer action pipelines.
//!
//! Groundwork models how a sequence of setup steps concludes:
//!
//! - **Outcome tracking**: every operation finishes with an immutable
//!   [`Outcome`](core::Outcome) carrying severity, message, captured fault
//!   and a backward chain to prior outcomes
//! - **Typed payloads**: [`OutcomeContainer`](core::OutcomeContainer) pairs
//!   an outcome with a strongly typed result and runtime-checked casts
//! - **Ordered execution**: an [`InstallPipeline`](pipeline::InstallPipeline)
//!   runs actions in strictly ascending order-key order, halting at the
//!   first failure
//! - **Progress reporting**: a [`ProgressTracker`](progress::ProgressTracker)
//!   turns step completion into bounded percentage notifications
//!
//! ## Quick Start
//!
//! ```rust
//! use groundwork::prelude::*;
//! use std::sync::Arc;
//!
//! let action = FnAction::new("create_database", |_args: &ActionArgs| {
//!     ActionOutcome::new(Outcome::success(), serde_json::json!({"db": "storefront"}))
//! });
//!
//! let mut pipeline = InstallPlanBuilder::new("storefront-setup")
//!     .action(0, Arc::new(action))?
//!     .build()?;
//!
//! let result = pipeline.install();
//! assert!(result.is_success());
//! # Ok::<(), groundwork::errors::GroundworkError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod core;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod progress;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Disposition, HasContent, Outcome, OutcomeContainer, Severity,
    };
    pub use crate::errors::GroundworkError;
    pub use crate::pipeline::{
        ActionArgs, ActionOutcome, ErrorSink, FnAction, InstallAction,
        InstallPipeline, InstallPlanBuilder, NoOpAction,
    };
    pub use crate::progress::{ProgressCallback, ProgressTracker, ProgressUpdate};
    pub use crate::utils::{generate_uuid, iso_timestamp, Timestamp};
}

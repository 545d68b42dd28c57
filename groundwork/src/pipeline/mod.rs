//! Install plan building and execution.
//!
//! This module provides:
//! - The install action contract and positional argument list
//! - A plan builder with order-key validation
//! - The fail-fast install pipeline

mod action;
mod builder;
mod install;

pub use action::{ActionArgs, ActionOutcome, FnAction, InstallAction, NoOpAction};
pub use builder::InstallPlanBuilder;
pub use install::{ErrorSink, InstallPipeline};

//! Fail-fast execution of an ordered install plan.

use super::action::{ActionArgs, ActionOutcome, InstallAction};
use crate::core::Outcome;
use crate::errors::GroundworkError;
use crate::progress::ProgressTracker;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Sink invoked with the causing fault of the first failing action.
pub type ErrorSink = Arc<dyn Fn(&anyhow::Error) + Send + Sync>;

/// Ordered, fail-fast executor of install actions.
///
/// A pipeline owns its actions sorted by ascending order key, the shared
/// arguments forwarded to every action, a progress tracker sized to the
/// action count, and an optional error sink. It assumes exclusive ownership
/// of the execution context (e.g. a connection handle placed in the shared
/// arguments) for the full duration of one [`install`](Self::install) call.
pub struct InstallPipeline {
    name: String,
    actions: Vec<(u32, Arc<dyn InstallAction>)>,
    args: ActionArgs,
    progress: ProgressTracker,
    error_sink: Option<ErrorSink>,
}

impl InstallPipeline {
    pub(super) fn new(
        name: String,
        actions: Vec<(u32, Arc<dyn InstallAction>)>,
        args: ActionArgs,
        progress: ProgressTracker,
        error_sink: Option<ErrorSink>,
    ) -> Self {
        Self {
            name,
            actions,
            args,
            progress,
            error_sink,
        }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of actions.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Returns the registered order keys, ascending.
    #[must_use]
    pub fn order_keys(&self) -> Vec<u32> {
        self.actions.iter().map(|(key, _)| *key).collect()
    }

    /// Runs every action in strictly ascending order-key order, halting at
    /// the first failure.
    ///
    /// The progress tracker advances by exactly one unit after every
    /// invocation regardless of its outcome. On the first non-success
    /// outcome the error sink receives the causing fault and the failing
    /// container is returned; later actions never run and effects already
    /// applied by earlier actions are not compensated. A panic escaping an
    /// action is caught once here, wrapped into a failure outcome, and
    /// treated the same way. On full success the last action's container is
    /// returned.
    pub fn install(&mut self) -> ActionOutcome {
        let mut last: Option<ActionOutcome> = None;

        for (key, action) in &self.actions {
            debug!(
                pipeline = %self.name,
                order = *key,
                action = action.name(),
                "executing install action"
            );

            let container = match catch_unwind(AssertUnwindSafe(|| action.execute(&self.args))) {
                Ok(container) => container,
                Err(panic) => ActionOutcome::from_error(GroundworkError::ActionPanicked {
                    action: action.name().to_string(),
                    message: panic_message(panic.as_ref()),
                }),
            };

            self.progress
                .advance(1, Some(action.name()), Some(container.severity()));

            if !container.is_success() {
                error!(
                    pipeline = %self.name,
                    order = *key,
                    action = action.name(),
                    error = container.message().as_deref().unwrap_or("unknown"),
                    "install action failed, halting"
                );
                route_fault(self.error_sink.as_ref(), &container);
                return container;
            }

            last = Some(container);
        }

        info!(
            pipeline = %self.name,
            actions = self.actions.len(),
            percent = self.progress.percent(),
            "install completed"
        );
        last.unwrap_or_else(|| ActionOutcome::empty(Outcome::success()))
    }

    /// Asynchronous installation is not offered.
    ///
    /// The steps an install pipeline orchestrates (schema and DDL
    /// operations) are inherently sequential and not safely cancelable
    /// mid-step.
    ///
    /// # Errors
    ///
    /// Always returns [`GroundworkError::NotSupported`].
    pub fn install_async(&self) -> Result<ActionOutcome, GroundworkError> {
        Err(GroundworkError::NotSupported(format!(
            "pipeline '{}' executes synchronously only",
            self.name
        )))
    }
}

impl fmt::Debug for InstallPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallPipeline")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .field("args", &self.args)
            .finish()
    }
}

/// Hands the first causing fault to the error sink.
///
/// Failures built without a captured fault get one synthesized from the
/// resolved message, so the sink always observes an error value.
fn route_fault(sink: Option<&ErrorSink>, container: &ActionOutcome) {
    let Some(sink) = sink else {
        return;
    };
    if let Some(cause) = container.outcome().cause() {
        sink(cause);
    } else {
        let synthesized = anyhow::anyhow!(container
            .message()
            .unwrap_or_else(|| "install action failed".to_string()));
        sink(&synthesized);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

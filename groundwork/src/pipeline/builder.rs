//! Install plan builder with order-key validation.

use super::action::{ActionArgs, InstallAction};
use super::install::{ErrorSink, InstallPipeline};
use crate::errors::GroundworkError;
use crate::progress::{ProgressCallback, ProgressTracker, ProgressUpdate};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Builder for an [`InstallPipeline`].
///
/// Actions are keyed by an explicit integer order; duplicate keys are
/// rejected at registration time rather than silently overwriting, and the
/// built pipeline executes in strictly ascending key order.
pub struct InstallPlanBuilder {
    name: String,
    actions: BTreeMap<u32, Arc<dyn InstallAction>>,
    args: ActionArgs,
    on_progress: Option<ProgressCallback>,
    on_error: Option<ErrorSink>,
}

impl InstallPlanBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: BTreeMap::new(),
            args: ActionArgs::new(),
            on_progress: None,
            on_error: None,
        }
    }

    /// Registers an action under an order key.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::DuplicateOrderKey`] when the key is
    /// already taken.
    pub fn action(
        mut self,
        key: u32,
        action: Arc<dyn InstallAction>,
    ) -> Result<Self, GroundworkError> {
        if self.actions.contains_key(&key) {
            return Err(GroundworkError::DuplicateOrderKey(key));
        }
        self.actions.insert(key, action);
        Ok(self)
    }

    /// Sets the shared arguments forwarded to every action.
    #[must_use]
    pub fn args(mut self, args: ActionArgs) -> Self {
        self.args = args;
        self
    }

    /// Binds a progress callback.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Binds an error sink invoked with the first causing fault.
    #[must_use]
    pub fn on_error<F>(mut self, sink: F) -> Self
    where
        F: Fn(&anyhow::Error) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(sink));
        self
    }

    /// Returns the number of registered actions.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::EmptyPlan`] when no actions were
    /// registered.
    pub fn build(self) -> Result<InstallPipeline, GroundworkError> {
        if self.actions.is_empty() {
            return Err(GroundworkError::EmptyPlan);
        }

        // BTreeMap iteration yields strictly ascending keys.
        let actions: Vec<(u32, Arc<dyn InstallAction>)> = self.actions.into_iter().collect();
        let progress = ProgressTracker::from_start(actions.len(), self.on_progress)?;

        Ok(InstallPipeline::new(
            self.name,
            actions,
            self.args,
            progress,
            self.on_error,
        ))
    }
}

impl fmt::Debug for InstallPlanBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallPlanBuilder")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NoOpAction;

    #[test]
    fn test_duplicate_key_rejected() {
        let builder = InstallPlanBuilder::new("db-setup")
            .action(0, Arc::new(NoOpAction::new("create_database")))
            .unwrap();

        let err = builder
            .action(0, Arc::new(NoOpAction::new("create_login")))
            .unwrap_err();
        assert!(matches!(err, GroundworkError::DuplicateOrderKey(0)));
    }

    #[test]
    fn test_empty_plan_rejected() {
        let err = InstallPlanBuilder::new("db-setup").build().unwrap_err();
        assert!(matches!(err, GroundworkError::EmptyPlan));
    }

    #[test]
    fn test_build_sorts_by_key() {
        let pipeline = InstallPlanBuilder::new("db-setup")
            .action(5, Arc::new(NoOpAction::new("last")))
            .unwrap()
            .action(1, Arc::new(NoOpAction::new("first")))
            .unwrap()
            .action(3, Arc::new(NoOpAction::new("middle")))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(pipeline.order_keys(), vec![1, 3, 5]);
        assert_eq!(pipeline.action_count(), 3);
    }
}

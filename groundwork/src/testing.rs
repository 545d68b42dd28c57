//! Mock actions and recording sinks for testing.

use crate::core::Outcome;
use crate::pipeline::{ActionArgs, ActionOutcome, InstallAction};
use crate::progress::{ProgressCallback, ProgressUpdate};
use parking_lot::Mutex;
use std::sync::Arc;

/// A mock action that records calls and returns a configurable outcome.
#[derive(Debug)]
pub struct MockAction {
    name: String,
    output: Mutex<ActionOutcome>,
    call_count: Mutex<usize>,
    panic_message: Mutex<Option<String>>,
}

impl MockAction {
    /// Creates a new mock action with a success outcome.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: Mutex::new(ActionOutcome::empty(Outcome::success())),
            call_count: Mutex::new(0),
            panic_message: Mutex::new(None),
        }
    }

    /// Creates a mock action that fails with a captured fault.
    #[must_use]
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        let action = Self::new(name);
        action.set_output(ActionOutcome::from_error(anyhow::anyhow!(message.into())));
        action
    }

    /// Creates a mock action that panics instead of returning.
    #[must_use]
    pub fn panicking(name: impl Into<String>, message: impl Into<String>) -> Self {
        let action = Self::new(name);
        *action.panic_message.lock() = Some(message.into());
        action
    }

    /// Sets the outcome to return.
    pub fn set_output(&self, output: ActionOutcome) {
        *self.output.lock() = output;
    }

    /// Returns the number of times the action was executed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock()
    }
}

impl InstallAction for MockAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, _args: &ActionArgs) -> ActionOutcome {
        *self.call_count.lock() += 1;
        if let Some(message) = self.panic_message.lock().clone() {
            panic!("{message}");
        }
        self.output.lock().clone()
    }
}

/// Records every progress update delivered to its callback.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    updates: Arc<Mutex<Vec<ProgressUpdate>>>,
}

impl RecordingProgress {
    /// Creates a new recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a callback that appends into this recorder.
    #[must_use]
    pub fn callback(&self) -> ProgressCallback {
        let updates = self.updates.clone();
        Arc::new(move |update| updates.lock().push(update))
    }

    /// Returns the recorded updates.
    #[must_use]
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().clone()
    }

    /// Returns the recorded percentages, in delivery order.
    #[must_use]
    pub fn percents(&self) -> Vec<u8> {
        self.updates.lock().iter().map(|u| u.percent).collect()
    }
}

/// Records every fault routed to an error sink.
#[derive(Debug, Default)]
pub struct RecordingErrors {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingErrors {
    /// Creates a new recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sink closure that appends into this recorder.
    #[must_use]
    pub fn sink(&self) -> impl Fn(&anyhow::Error) + Send + Sync + 'static {
        let messages = self.messages.clone();
        move |err: &anyhow::Error| messages.lock().push(err.to_string())
    }

    /// Returns the recorded fault messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_action_records_calls() {
        let action = MockAction::new("mock");
        assert_eq!(action.call_count(), 0);

        action.execute(&ActionArgs::new());
        action.execute(&ActionArgs::new());
        assert_eq!(action.call_count(), 2);
    }

    #[test]
    fn test_failing_mock_carries_fault() {
        let action = MockAction::failing("mock", "no permission");
        let outcome = action.execute(&ActionArgs::new());
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), Some("no permission".to_string()));
        assert!(outcome.outcome().cause().is_some());
    }

    #[test]
    fn test_recording_progress() {
        let recorder = RecordingProgress::new();
        let callback = recorder.callback();
        callback(ProgressUpdate {
            percent: 50,
            message: None,
            severity: None,
        });
        assert_eq!(recorder.percents(), vec![50]);
    }
}

//! Install action contract and positional argument list.

use crate::core::OutcomeContainer;
use crate::errors::GroundworkError;
use std::any::{type_name, Any};
use std::fmt::Debug;
use std::sync::Arc;

/// The container every install action returns.
///
/// Action payloads are opaque result handles; callers that need a concrete
/// type go through [`OutcomeContainer::cast`].
pub type ActionOutcome = OutcomeContainer<serde_json::Value>;

/// Positional, loosely typed arguments shared across an install plan.
///
/// Each slot holds a value behind `dyn Any`; actions validate their expected
/// slots with [`get`](Self::get), which fails with an invalid-argument
/// condition when a slot is missing or holds a different type.
#[derive(Clone, Default)]
pub struct ActionArgs {
    slots: Vec<Arc<dyn Any + Send + Sync>>,
}

impl ActionArgs {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value as the next positional slot.
    #[must_use]
    pub fn with_arg<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.slots.push(Arc::new(value));
        self
    }

    /// Appends a value in place.
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.slots.push(Arc::new(value));
    }

    /// Returns the value at `position` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::InvalidArgument`] when the slot is absent
    /// or holds a value of another type.
    pub fn get<T: Any + Send + Sync>(&self, position: usize) -> Result<&T, GroundworkError> {
        self.slots
            .get(position)
            .and_then(|slot| slot.downcast_ref::<T>())
            .ok_or(GroundworkError::InvalidArgument {
                position,
                expected: type_name::<T>(),
            })
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slots are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Debug for ActionArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionArgs")
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// Trait for install actions.
///
/// An action is a single named unit of work invoked with the plan's shared
/// positional arguments. Argument validation failures are captured into the
/// returned failure outcome, never raised past the result channel.
pub trait InstallAction: Send + Sync + Debug {
    /// Returns the name of the action.
    fn name(&self) -> &str;

    /// Whether the action offers an asynchronous variant.
    fn supports_async(&self) -> bool {
        false
    }

    /// Executes the action with the shared arguments.
    fn execute(&self, args: &ActionArgs) -> ActionOutcome;

    /// Executes the asynchronous variant.
    ///
    /// When [`supports_async`](Self::supports_async) is false this fails
    /// with a not-supported outcome without attempting execution.
    fn execute_async(&self, args: &ActionArgs) -> ActionOutcome {
        if self.supports_async() {
            self.execute(args)
        } else {
            ActionOutcome::from_error(GroundworkError::NotSupported(format!(
                "action '{}' has no asynchronous variant",
                self.name()
            )))
        }
    }
}

/// A simple function-based install action.
pub struct FnAction<F>
where
    F: Fn(&ActionArgs) -> ActionOutcome + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnAction<F>
where
    F: Fn(&ActionArgs) -> ActionOutcome + Send + Sync,
{
    /// Creates a new function-based action.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnAction<F>
where
    F: Fn(&ActionArgs) -> ActionOutcome + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAction").field("name", &self.name).finish()
    }
}

impl<F> InstallAction for FnAction<F>
where
    F: Fn(&ActionArgs) -> ActionOutcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, args: &ActionArgs) -> ActionOutcome {
        (self.func)(args)
    }
}

/// A no-op action for testing.
#[derive(Debug, Clone)]
pub struct NoOpAction {
    name: String,
}

impl NoOpAction {
    /// Creates a new no-op action.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl InstallAction for NoOpAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, _args: &ActionArgs) -> ActionOutcome {
        ActionOutcome::empty(crate::core::Outcome::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;

    #[test]
    fn test_args_positional_access() {
        let args = ActionArgs::new()
            .with_arg("master".to_string())
            .with_arg(42_u16);

        assert_eq!(args.len(), 2);
        assert_eq!(args.get::<String>(0).unwrap(), "master");
        assert_eq!(*args.get::<u16>(1).unwrap(), 42);
    }

    #[test]
    fn test_args_type_mismatch() {
        let args = ActionArgs::new().with_arg(1_u32);
        let err = args.get::<String>(0).unwrap_err();
        assert!(matches!(
            err,
            GroundworkError::InvalidArgument { position: 0, .. }
        ));
    }

    #[test]
    fn test_args_missing_slot() {
        let args = ActionArgs::new();
        let err = args.get::<u32>(3).unwrap_err();
        assert!(matches!(
            err,
            GroundworkError::InvalidArgument { position: 3, .. }
        ));
    }

    #[test]
    fn test_fn_action() {
        let action = FnAction::new("create_schema", |_args| {
            ActionOutcome::new(Outcome::success(), serde_json::json!({"tables": 4}))
        });

        assert_eq!(action.name(), "create_schema");
        let outcome = action.execute(&ActionArgs::new());
        assert!(outcome.is_success());
        assert!(outcome.has_payload());
    }

    #[test]
    fn test_validation_failure_stays_in_result_channel() {
        let action = FnAction::new("create_login", |args: &ActionArgs| {
            match args.get::<String>(0) {
                Ok(login) => {
                    ActionOutcome::new(Outcome::success(), serde_json::json!({"login": login}))
                }
                Err(err) => ActionOutcome::from_error(err),
            }
        });

        let outcome = action.execute(&ActionArgs::new());
        assert!(!outcome.is_success());
        assert!(outcome
            .message()
            .unwrap()
            .contains("Invalid argument at position 0"));
    }

    #[test]
    fn test_async_variant_not_supported() {
        let action = NoOpAction::new("noop");
        assert!(!action.supports_async());

        let outcome = action.execute_async(&ActionArgs::new());
        assert!(!outcome.is_success());
        assert!(outcome.message().unwrap().contains("not supported"));
    }
}

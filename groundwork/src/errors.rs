//! Error types for the groundwork framework.
//!
//! Every condition the installer core can raise is a variant of
//! [`GroundworkError`]. Arbitrary faults captured from external
//! collaborators travel as [`anyhow::Error`] inside an
//! [`Outcome`](crate::core::Outcome) and are converted back into a
//! `GroundworkError` only at explicit raise points.

use thiserror::Error;

/// The main error type for groundwork operations.
#[derive(Debug, Error)]
pub enum GroundworkError {
    /// A positional argument slot was missing or held a different type.
    #[error("Invalid argument at position {position}: expected {expected}")]
    InvalidArgument {
        /// The positional slot that failed validation.
        position: usize,
        /// The type name the slot was expected to hold.
        expected: &'static str,
    },

    /// A payload could not be converted to the requested type.
    #[error("Invalid cast from {from} to {to}")]
    InvalidCast {
        /// Type name of the payload being converted.
        from: &'static str,
        /// Type name of the requested target.
        to: &'static str,
    },

    /// A numeric argument was outside its allowed range.
    #[error("Argument '{name}' out of range: {value}")]
    OutOfRange {
        /// The argument name.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// The requested operation has no supported implementation.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// An install plan already contains an action with this order key.
    #[error("Duplicate action order key {0}")]
    DuplicateOrderKey(u32),

    /// An install plan was built without any actions.
    #[error("Install plan has no actions")]
    EmptyPlan,

    /// An action panicked instead of returning through its result channel.
    #[error("Action '{action}' panicked: {message}")]
    ActionPanicked {
        /// The action name.
        action: String,
        /// The rendered panic payload.
        message: String,
    },

    /// A failed outcome was explicitly raised by a caller.
    #[error("{message}")]
    Failed {
        /// The message resolved from the failed outcome.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = GroundworkError::InvalidArgument {
            position: 2,
            expected: "alloc::string::String",
        };
        assert!(err.to_string().contains("position 2"));
        assert!(err.to_string().contains("String"));
    }

    #[test]
    fn test_duplicate_order_key_display() {
        let err = GroundworkError::DuplicateOrderKey(7);
        assert_eq!(err.to_string(), "Duplicate action order key 7");
    }

    #[test]
    fn test_failed_renders_message_only() {
        let err = GroundworkError::Failed {
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "disk full");
    }
}

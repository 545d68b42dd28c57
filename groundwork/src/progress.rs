//! Bounded progress tracking with percentage notifications.

use crate::core::Severity;
use crate::errors::GroundworkError;
use std::fmt;
use std::sync::Arc;

/// A single progress notification.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Percent complete, 0 through 100.
    pub percent: u8,
    /// Optional status message for the step just completed.
    pub message: Option<String>,
    /// Optional severity of the step just completed.
    pub severity: Option<Severity>,
}

/// Callback invoked on every advance of a [`ProgressTracker`].
pub type ProgressCallback = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// Converts advancing position within a bounded unit count into percentage
/// notifications.
///
/// A tracker is created per bounded operation, mutated only through
/// [`advance`](Self::advance), and discarded when the operation completes.
pub struct ProgressTracker {
    initial_index: usize,
    total_items: usize,
    current_index: usize,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    /// Creates a new tracker.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::OutOfRange`] when `total_items` is zero or
    /// `initial_index` lies past the last item.
    pub fn new(
        initial_index: usize,
        total_items: usize,
        callback: Option<ProgressCallback>,
    ) -> Result<Self, GroundworkError> {
        if total_items < 1 {
            return Err(GroundworkError::OutOfRange {
                name: "total_items",
                value: total_items,
            });
        }
        if initial_index > total_items - 1 {
            return Err(GroundworkError::OutOfRange {
                name: "initial_index",
                value: initial_index,
            });
        }
        Ok(Self {
            initial_index,
            total_items,
            current_index: initial_index,
            callback,
        })
    }

    /// Creates a tracker starting at index zero.
    ///
    /// # Errors
    ///
    /// Returns [`GroundworkError::OutOfRange`] when `total_items` is zero.
    pub fn from_start(
        total_items: usize,
        callback: Option<ProgressCallback>,
    ) -> Result<Self, GroundworkError> {
        Self::new(0, total_items, callback)
    }

    /// Advances the tracker and notifies the bound callback.
    ///
    /// A full no-op when no callback is bound. Otherwise the current index
    /// moves forward by `amount`, clamped to `total_items - 1` so that 100%
    /// is never reported before the final unit of work is confirmed
    /// complete, and the callback receives the floored percentage.
    pub fn advance(&mut self, amount: usize, message: Option<&str>, severity: Option<Severity>) {
        let Some(callback) = &self.callback else {
            return;
        };

        self.current_index = (self.current_index + amount).min(self.total_items - 1);

        callback(ProgressUpdate {
            percent: self.percent(),
            message: message.map(str::to_string),
            severity,
        });
    }

    /// Advances by exactly one unit with no message or severity.
    pub fn tick(&mut self) {
        self.advance(1, None, None);
    }

    /// Returns the floored completion percentage for the current index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(&self) -> u8 {
        // current_index < total_items, so this never reaches 100.
        ((self.current_index * 100) / self.total_items) as u8
    }

    /// Returns the index the tracker started at.
    #[must_use]
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    /// Returns the current index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the total unit count.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns true if a callback is bound.
    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("initial_index", &self.initial_index)
            .field("total_items", &self.total_items)
            .field("current_index", &self.current_index)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

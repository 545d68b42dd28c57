//! Tracing subscriber setup for applications embedding the framework.

use tracing_subscriber::EnvFilter;

/// Initializes a global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to the given default
/// directive. Safe to call more than once; later calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("debug");
        init_tracing("info");
        // Second call must not panic.
    }
}

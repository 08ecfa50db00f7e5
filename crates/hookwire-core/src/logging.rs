//! Production logging setup.
//!
//! Emits newline-delimited JSON records filtered by `RUST_LOG`, falling
//! back to `default_directive` when the variable is unset or invalid.

use tracing_subscriber::EnvFilter;

/// Install a global JSON subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_json(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
}

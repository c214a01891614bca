//! Structured logging bootstrap.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global JSON subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; a second install attempt is logged and
/// ignored so embedding hosts and test harnesses can both call it.
pub fn init() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

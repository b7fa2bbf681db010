//! Tracing setup for the host application.

use tracing_subscriber::EnvFilter;

use crate::state::config::{TrackerConfig, DEFAULT_LOG_FILTER};

/// Install a global fmt subscriber filtered by `config.log_filter`.
///
/// An unparsable filter falls back to `info`. Fails if a global subscriber
/// is already set.
pub fn init_tracing(config: &TrackerConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish()
        .try_init()
}

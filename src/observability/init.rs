//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber for the engine side: an
//! environment-filtered `fmt` layer writing to stderr. Observability is
//! optional; initialization is idempotent and failures are silent, since a
//! missing subscriber only costs log output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Initializes the tracing subscriber.
///
/// The filter level comes from `config.trace_level`, defaulting to `"info"`.
/// Safe to call multiple times: only the first call installs a subscriber,
/// later calls are no-ops.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}

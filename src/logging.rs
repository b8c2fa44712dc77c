//! Logging setup
//!
//! stdout carries the PUTVAL stream, so all log output goes to stderr,
//! which collectd's exec plugin forwards to its own log.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize stderr logging, level from RUST_LOG (default "info")
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .with_filter(env_filter),
        )
        .init();
}

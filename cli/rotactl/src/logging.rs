//! Logging initialization for the CLI.
//!
//! Logs go to stderr so stdout stays machine-readable.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback when `RUST_LOG` is unset.
const LEVEL_ENV: &str = "ROTA_LOG_LEVEL";

const DEFAULT_LEVEL: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level_filter(std::env::var(LEVEL_ENV).ok().as_deref()))
}

fn level_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init() {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(io::stderr);

    // A second init (tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(stderr_layer)
        .try_init();
}

// src/logging.rs
//! Subscriber setup for the command-line tools

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Install a formatted subscriber honoring `RUST_LOG`
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

//! Structured logging setup for the terrain pipeline.
//!
//! Span-based, filterable logging via the `tracing` ecosystem: console
//! output with uptime timestamps, module paths, and thread names (the
//! fetch worker is named, which makes its per-chunk timing logs easy to
//! follow).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. Calling this more than
/// once is an error in the caller; the subscriber is process global.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_env_filter());

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// The default filter: `info` everywhere.
#[must_use]
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

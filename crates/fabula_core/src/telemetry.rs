//! Tracing subscriber setup for binaries and integration harnesses.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Human-readable fmt output filtered by the `RUST_LOG` environment
/// variable. Call once at process start; library code only emits events
/// and never installs a subscriber.
///
/// # Errors
///
/// Returns error if a subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    Ok(())
}

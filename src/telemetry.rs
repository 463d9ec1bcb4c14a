/*!
 * Tracing Bootstrap
 * Structured logging setup for hosts embedding the engine
 *
 * Environment variables:
 * - RUST_LOG: set log level (default: info)
 * - MEMWATCH_TRACE_JSON: enable JSON output (default: false)
 */

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing for the hosting process.
///
/// Safe to skip when the host installs its own subscriber; the engine
/// only emits `tracing` events and never requires one.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("MEMWATCH_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true),
            )
            .init();
        info!("structured tracing initialized with JSON output");
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).compact())
            .init();
        info!("structured tracing initialized");
    }
}

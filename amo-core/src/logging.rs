//! Structured logging setup using the `tracing` ecosystem.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize a console tracing subscriber at the given level.
///
/// The level string accepts anything `EnvFilter` understands ("debug",
/// "amo_api=trace,info", ...), falling back to "info" on a parse failure.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init();
}

//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`. The default level is `warn` so
//! the assistant's own terminal output stays clean; set `CCR_LOG=debug` (any
//! `EnvFilter` directive) for more.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CCR_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Call once, before any logging.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

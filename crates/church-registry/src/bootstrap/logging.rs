//! Logging initialization: env-filter with optional JSON output.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initializes the global subscriber once; repeated calls are no-ops so
/// tests can share a process.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) {
    let default_directive = match verbosity {
        0 => config.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let initialized = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if initialized.is_err() {
        tracing::debug!("logging already initialized");
    }
}

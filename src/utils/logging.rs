//! Logging bootstrap for the hub and the demo binary.
//!
//! The configured `logging.level` is the default filter. A `RUST_LOG`
//! environment variable, when set and valid, replaces it entirely so
//! operators can turn on `topichub=trace` without touching the config file.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Filter directive for a configured level name.
///
/// Unknown names fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "error" => "error",
        "warn" | "warning" => "warn",
        "debug" => "debug",
        "trace" => "trace",
        "off" => "off",
        _ => "info",
    }
}

/// Builds the filter used by [`init`]: `RUST_LOG` if it parses, the
/// configured level otherwise.
pub fn build_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&settings.level)))
}

/// Installs a fmt subscriber filtered per [`build_filter`].
///
/// Uses `try_init`, so a second call (tests, embedding applications) leaves
/// the first subscriber in place.
pub fn init(settings: &LoggingSettings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_target(false)
        .try_init();
}

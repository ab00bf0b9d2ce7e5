//! Tracing subscriber initialisation for the binary.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_LOG_FILTER: &str = "waybill=info";

/// Error returned when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync>;

/// Installs a formatted stderr subscriber filtered by `RUST_LOG`.
///
/// Log lines go to stderr so that command output on stdout stays clean.
///
/// # Errors
///
/// Returns an error when a global subscriber has already been set.
pub fn init_tracing() -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(std::io::stderr)
        .try_init()
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

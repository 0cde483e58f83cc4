//! Tracing setup and log helpers

use registrar_domain::RegistrarError;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Setting
/// `REGISTRAR_LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("REGISTRAR_LOG_FORMAT").is_ok_and(|format| format == "json");

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if let Err(err) = result {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

/// Convert a `RegistrarError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &RegistrarError) -> &'static str {
    match error {
        RegistrarError::Config(_) => "config",
        RegistrarError::Network(_) => "network",
        RegistrarError::InvalidInput(_) => "invalid_input",
        RegistrarError::Schedule(_) => "schedule",
        RegistrarError::ExhaustedRetries { .. } => "exhausted_retries",
        RegistrarError::Internal(_) => "internal",
    }
}

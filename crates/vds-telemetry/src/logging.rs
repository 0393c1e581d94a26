//! Structured logging.
//!
//! Human-readable output for development, JSON lines for log shippers.
//! Every event carries the structured fields set at the call site
//! (`document_type`, `messages`, `signed`, ...).

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// # Errors
/// * `TelemetryError::Config` - `log_level` is not a valid filter directive
/// * `TelemetryError::LoggingInit` - a global subscriber is already set
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {e}", config.log_level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

/// Log a seal-related event with standard fields.
///
/// ```rust,ignore
/// log_seal_event!(info, "ICAO_VISA", "Seal accepted", signed = true);
/// ```
#[macro_export]
macro_rules! log_seal_event {
    ($level:ident, $document_type:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            document_type = %$document_type,
            $($($field)*,)?
            $msg
        )
    };
}

//! # VDS Telemetry
//!
//! Logging setup shared by hosts of the seal codec. Library crates only
//! emit `tracing` events; binaries and test harnesses call
//! [`init_logging`] once.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vds_telemetry::{init_logging, TelemetryConfig};
//!
//! init_logging(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VDS_LOG_LEVEL` | `info` | Filter directive, falls back to `RUST_LOG` |
//! | `VDS_JSON_LOGS` | `false` | JSON lines output |
//! | `VDS_SERVICE_NAME` | `vds-codec` | Service name on the startup event |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "vds-codec");
    }

    #[test]
    fn test_seal_event_macro_expands() {
        crate::log_seal_event!(debug, "ICAO_VISA", "Seal parsed", messages = 3);
    }
}

//! # Bus Telemetry
//!
//! Logging bootstrap for applications embedding the event bus. The bus
//! itself only emits `tracing` events; this crate installs the subscriber
//! that renders them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bus_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!
//!     // Bus activity is now logged at the configured level
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EVENT_BUS_SERVICE_NAME` | `event-bus` | Service name in the startup line |
//! | `EVENT_BUS_LOG_LEVEL` | `info` | Filter directive (falls back to `RUST_LOG`) |
//! | `EVENT_BUS_JSON_LOGS` | `false` | JSON lines instead of plain text |
//! | `EVENT_BUS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Failed to install global subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging for the process.
///
/// Fails with [`TelemetryError::SubscriberInit`] if a global subscriber is
/// already installed.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard returned by [`init_telemetry`]. Logs shutdown when dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

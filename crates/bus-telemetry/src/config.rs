//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for the logging subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter directive (trace, debug, info, or `event_bus=debug,info`)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to write logs to the console at all
    pub console_output: bool,

    /// Whether to include the module target in each line
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "event-bus".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            console_output: true,
            with_target: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EVENT_BUS_SERVICE_NAME`: Service name (default: event-bus)
    /// - `EVENT_BUS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `EVENT_BUS_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `EVENT_BUS_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `EVENT_BUS_LOG_TARGET`: Include module targets (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            service_name: lookup("EVENT_BUS_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("EVENT_BUS_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("EVENT_BUS_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            console_output: lookup("EVENT_BUS_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            with_target: lookup("EVENT_BUS_LOG_TARGET")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.with_target),
        }
    }

    /// Builder-style method to set the log level directive.
    #[must_use]
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Builder-style method to toggle JSON output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Builder-style method to toggle module targets in each line.
    #[must_use]
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }
}

//! Logging configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the logging bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error or a full directive)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wibbtc".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WIBBTC_SERVICE_NAME`: Service name (default: wibbtc)
    /// - `WIBBTC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WIBBTC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `WIBBTC_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("WIBBTC_SERVICE_NAME").unwrap_or_else(|| "wibbtc".to_string()),

            log_level: lookup("WIBBTC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("WIBBTC_CONSOLE_OUTPUT")
                .map_or(true, |v| v.to_lowercase() != "false" && v != "0"),

            json_logs: lookup("WIBBTC_JSON_LOGS")
                .map_or(is_container, |v| v.to_lowercase() == "true" || v == "1"),
        }
    }

    /// Configuration for a named component, e.g. `ledger` gives `wibbtc-ledger`.
    #[must_use]
    pub fn for_component(component: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("{}-{}", config.service_name, component);
        config
    }
}

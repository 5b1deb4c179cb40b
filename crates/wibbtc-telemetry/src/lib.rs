//! # wibBTC Telemetry
//!
//! Logging bootstrap shared by wibBTC binaries and test harnesses.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wibbtc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_component("ledger");
//!     init_logging(&config).expect("Failed to init logging");
//!
//!     // Ledger spans and events are now printed
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WIBBTC_SERVICE_NAME` | `wibbtc` | Service name in log lines |
//! | `WIBBTC_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `WIBBTC_CONSOLE_OUTPUT` | `true` | Print to stdout |
//! | `WIBBTC_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, init_test_logging};

use thiserror::Error;

/// Logging initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The level directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already set.
    #[error("Failed to install subscriber: {0}")]
    AlreadyInstalled(String),
}

/// Convenience macro for creating a span with component context.
///
/// # Example
///
/// ```rust,ignore
/// use wibbtc_telemetry::component_span;
///
/// let _span = component_span!("rebalance", component = "ledger", round = 7).entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

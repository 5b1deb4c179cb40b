//! Configuration for the share ledger

use serde::{Deserialize, Serialize};

/// Ledger configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Token name reported by `name()`
    pub name: String,
    /// Token symbol reported by `symbol()`
    pub symbol: String,
    /// Decimals of the wrapped balance (matches the underlying)
    pub decimals: u8,
    /// Events retained in memory (0 = unbounded)
    pub max_event_log: usize,
    /// Run the accounting invariants after every mutation
    pub check_invariants: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "Wrapped Interest-Bearing Bitcoin".to_string(),
            symbol: "wibBTC".to_string(),
            decimals: 18,
            max_event_log: 10_000,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

//! # wibBTC Ledger - Share-Based Wrapper for a Rebasing Asset
//!
//! **Crate:** `wibbtc-ledger`
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Wraps an interest-bearing token (ibBTC) whose value grows against BTC.
//! Holders own *shares*; their wrapped balance is `shares x rate / 1e18`, where
//! the rate comes from the core's price-per-share. Balances therefore rebase
//! as the rate moves while share counts stay fixed.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Sum of account shares equals total shares | `domain/invariants.rs` - `check_share_conservation()` |
//! | No zero-share holders are stored | `domain/entities.rs` - `LedgerState::apply()` |
//! | Sum of balances never exceeds total supply | `domain/invariants.rs` - `check_supply_not_exceeding()` |
//! | Failed operations leave no trace | `service.rs` - validate, call collaborator, then apply |
//! | Burns never pay out more than the caller's balance | `domain/services.rs` - `shares_for_redemption()` rounds up |
//! | Initialization happens exactly once | `service.rs` - `ShareLedger::initialize()` |
//!
//! ## Rounding
//!
//! | Conversion | Direction |
//! |-----------|-----------|
//! | Deposit to shares (`mint`) | down |
//! | Balance to shares (`transfer`) | down |
//! | Balance to shares (`burn`) | up |
//! | Shares to balance (`balance_of`, `total_supply`) | down |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |-----------|-------|---------|
//! | Underlying asset (ibBTC) | `UnderlyingAsset` | Pull deposits, pay out redemptions |
//! | Core | `RateSource` | Current price-per-share |
//!
//! ## Usage Example
//!
//! ```
//! use wibbtc_ledger::prelude::*;
//!
//! let d = create_test_ledger();
//! let alice = Address::new([0xA1; 20]);
//!
//! d.asset.mint(alice, U256::from(1_000u64));
//! d.asset.approve(alice, d.ledger.address(), U256::from(1_000u64));
//!
//! let shares = d.ledger.mint(alice, U256::from(1_000u64)).unwrap();
//! assert_eq!(shares, U256::from(1_000u64));
//!
//! // The rate doubles; the balance follows without any transfer.
//! d.rate.set_raw(RATE_PRECISION * U256::from(2u64));
//! assert_eq!(d.ledger.balance_of(alice).unwrap(), U256::from(2_000u64));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        mul_div, Address, ExchangeRate, Rounding, RATE_PRECISION, U256,
    };

    // Domain entities
    pub use crate::domain::entities::{AccountShares, LedgerSnapshot, LedgerState, ShareChange};

    // Domain services
    pub use crate::domain::services::{
        balance_for_shares, shares_for_deposit, shares_for_redemption, shares_for_transfer,
    };

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::{GovernanceApi, WrappedTokenApi};
    pub use crate::ports::outbound::{RateSource, UnderlyingAsset};

    // Events
    pub use crate::events::{EventLog, LedgerEvent};

    // Errors
    pub use crate::errors::{AssetError, LedgerError, RateError};

    // Config
    pub use crate::config::LedgerConfig;

    // Adapters
    pub use crate::adapters::{FixedRateSource, InMemoryAsset};

    // Service
    pub use crate::service::{
        create_test_ledger, test_addresses, Collaborator, InMemoryDeployment, InMemoryLedger,
        LedgerStats, ShareLedger,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component name used in log fields.
pub const COMPONENT_NAME: &str = "wibbtc-ledger";

// =============================================================================
// TESTS
// =============================================================================

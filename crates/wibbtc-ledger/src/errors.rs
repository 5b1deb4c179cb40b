//! # Error Types
//!
//! All error types for the share ledger and its collaborator ports.

use crate::domain::value_objects::{Address, U256};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors returned by ledger operations.
///
/// Every error aborts the operation that raised it; no partial state change
/// survives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Operation requires an initialized ledger.
    #[error("ledger not initialized")]
    NotInitialized,

    /// `initialize` was called a second time.
    #[error("ledger already initialized")]
    AlreadyInitialized,

    /// Rate source reported a zero exchange rate.
    #[error("invalid exchange rate: zero")]
    InvalidRate,

    /// Account does not hold enough shares (or balance) for the operation.
    #[error("insufficient shares: required {required}, available {available}")]
    InsufficientShares { required: U256, available: U256 },

    /// Underlying asset collaborator rejected a transfer.
    #[error("underlying transfer failed: {0}")]
    TransferFailed(#[from] AssetError),

    /// Recipient is the zero address or the ledger itself.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(Address),

    /// Rate source could not be queried.
    #[error("rate source unavailable: {0}")]
    RateUnavailable(#[from] RateError),

    /// Deposit too small to mint a single share at the current rate.
    #[error("deposit of {amount} mints zero shares")]
    DustAmount { amount: U256 },

    /// Spender allowance does not cover the requested amount.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// Caller lacks the governance role needed for the operation.
    #[error("unauthorized caller: {0}")]
    Unauthorized(Address),

    /// `accept_pending_governance` without a proposed successor.
    #[error("no pending governance")]
    NoPendingGovernance,

    /// A conversion or counter left the 256-bit range.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl LedgerError {
    /// Returns true if the failure originated in a collaborator call.
    #[must_use]
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::TransferFailed(_) | Self::RateUnavailable(_))
    }
}

// =============================================================================
// PORT ERRORS
// =============================================================================

/// Errors from the underlying asset collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Sender balance too low.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Spender has not been approved for the amount.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// The asset returned `false` without a reason.
    #[error("transfer rejected by asset")]
    Rejected,

    /// Asset unreachable or otherwise failed.
    #[error("asset error: {0}")]
    Other(String),
}

/// Errors from the rate source collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    /// Rate source unreachable.
    #[error("rate source unavailable")]
    Unavailable,

    /// Other rate source failure.
    #[error("rate source error: {0}")]
    Other(String),
}

// =============================================================================
// TESTS
// =============================================================================

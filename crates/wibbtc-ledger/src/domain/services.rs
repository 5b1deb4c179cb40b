//! # Domain Services
//!
//! Pure conversions between shares and wrapped-balance units.
//!
//! Rounding always favours the ledger:
//!
//! | Conversion | Used by | Rounding |
//! |------------|---------|----------|
//! | balance → shares | `mint`, `transfer` | down |
//! | balance → shares | `burn` | up |
//! | shares → balance | `balance_of`, `total_supply`, `burn_shares` | down |

use crate::domain::value_objects::{mul_div, ExchangeRate, Rounding, RATE_PRECISION, U256};
use crate::errors::LedgerError;

/// Shares credited for a deposit of `amount` underlying units.
pub fn shares_for_deposit(amount: U256, rate: ExchangeRate) -> Result<U256, LedgerError> {
    balance_to_shares(amount, rate, Rounding::Down)
}

/// Shares debited for a redemption of `amount` balance units.
///
/// Rounds up so a redemption never costs fewer shares than it is worth.
pub fn shares_for_redemption(amount: U256, rate: ExchangeRate) -> Result<U256, LedgerError> {
    balance_to_shares(amount, rate, Rounding::Up)
}

/// Shares moved by a transfer of `amount` balance units.
pub fn shares_for_transfer(amount: U256, rate: ExchangeRate) -> Result<U256, LedgerError> {
    balance_to_shares(amount, rate, Rounding::Down)
}

/// Balance units represented by `shares` at `rate`, rounded down.
///
/// A zero rate values every share at zero.
pub fn balance_for_shares(shares: U256, rate: ExchangeRate) -> Result<U256, LedgerError> {
    mul_div(shares, rate.raw(), RATE_PRECISION, Rounding::Down).ok_or(LedgerError::ArithmeticOverflow)
}

fn balance_to_shares(
    amount: U256,
    rate: ExchangeRate,
    rounding: Rounding,
) -> Result<U256, LedgerError> {
    if rate.is_zero() {
        return Err(LedgerError::InvalidRate);
    }
    mul_div(amount, RATE_PRECISION, rate.raw(), rounding).ok_or(LedgerError::ArithmeticOverflow)
}

// =============================================================================
// TESTS
// =============================================================================

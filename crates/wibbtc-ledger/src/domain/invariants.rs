//! # Domain Invariants
//!
//! Accounting invariants that MUST hold after every ledger mutation.
//!
//! - Share conservation: the per-account shares sum to `total_shares`.
//! - No empty holders: accounts with zero shares are not stored.
//! - Supply bound: the reported supply never exceeds what the shares are worth.

use crate::domain::entities::LedgerState;
use crate::domain::services::balance_for_shares;
use crate::domain::value_objects::{ExchangeRate, U256};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Share conservation: `sum(shares[a]) == total_shares`.
#[must_use]
pub fn check_share_conservation(state: &LedgerState) -> bool {
    sum_shares(state) == Some(state.total_shares())
}

/// Zero-share accounts are pruned.
#[must_use]
pub fn check_no_empty_holders(state: &LedgerState) -> bool {
    state.accounts().all(|(_, shares)| !shares.is_zero())
}

/// The sum of individually floored balances never exceeds the floored supply.
///
/// Holds for any rate; guarantees holders cannot collectively redeem more
/// than `total_supply()`.
#[must_use]
pub fn check_supply_not_exceeding(state: &LedgerState, rate: ExchangeRate) -> bool {
    let Ok(supply) = balance_for_shares(state.total_shares(), rate) else {
        return false;
    };
    let mut sum = U256::zero();
    for (_, shares) in state.accounts() {
        let Ok(balance) = balance_for_shares(*shares, rate) else {
            return false;
        };
        let Some(next) = sum.checked_add(balance) else {
            return false;
        };
        sum = next;
    }
    sum <= supply
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &LedgerState, rate: ExchangeRate) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_share_conservation(state) {
        violations.push(InvariantViolation::SharesNotConserved {
            sum: sum_shares(state),
            total: state.total_shares(),
        });
    }

    if !check_no_empty_holders(state) {
        violations.push(InvariantViolation::EmptyHolder);
    }

    if !check_supply_not_exceeding(state, rate) {
        violations.push(InvariantViolation::SupplyExceeded);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

fn sum_shares(state: &LedgerState) -> Option<U256> {
    state
        .accounts()
        .try_fold(U256::zero(), |acc, (_, shares)| acc.checked_add(*shares))
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the violations (empty if valid).
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(v) => v,
        }
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Per-account shares do not add up to the total (`None` = sum overflowed).
    SharesNotConserved {
        /// Sum of account shares.
        sum: Option<U256>,
        /// Recorded total.
        total: U256,
    },
    /// An account with zero shares is stored.
    EmptyHolder,
    /// Holder balances add up to more than the supply.
    SupplyExceeded,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SharesNotConserved { sum, total } => match sum {
                Some(sum) => write!(f, "shares not conserved: sum {sum} != total {total}"),
                None => write!(f, "shares not conserved: sum overflows, total {total}"),
            },
            Self::EmptyHolder => write!(f, "zero-share account stored"),
            Self::SupplyExceeded => write!(f, "holder balances exceed total supply"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

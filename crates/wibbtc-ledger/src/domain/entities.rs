//! # Domain Entities
//!
//! The ledger aggregate and the share changes applied to it.

use crate::domain::value_objects::{Address, ExchangeRate, U256};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// SHARE CHANGES
// =============================================================================

/// A single mutation of share balances.
///
/// Changes are validated against the state before any collaborator call and
/// applied only afterwards, so a failed collaborator leaves state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareChange {
    /// New shares credited to `to`; `total_shares` grows.
    Mint {
        /// Receiving account.
        to: Address,
        /// Shares created.
        shares: U256,
    },
    /// Shares debited from `from`; `total_shares` shrinks.
    Burn {
        /// Redeeming account.
        from: Address,
        /// Shares destroyed.
        shares: U256,
    },
    /// Shares moved between accounts; `total_shares` unchanged.
    Move {
        /// Sending account.
        from: Address,
        /// Receiving account.
        to: Address,
        /// Shares moved.
        shares: U256,
    },
}

// =============================================================================
// LEDGER STATE
// =============================================================================

/// The share ledger aggregate.
///
/// Holds only accounts with a non-zero share count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerState {
    /// Owner allowed to rotate governance and swap the rate source.
    pub governance: Address,
    /// Successor proposed by governance, awaiting acceptance.
    pub pending_governance: Option<Address>,
    /// Address of the wrapped rebasing asset.
    pub underlying_asset: Address,
    /// Address of the exchange-rate source.
    pub core: Address,
    shares: BTreeMap<Address, U256>,
    total_shares: U256,
    allowances: BTreeMap<(Address, Address), U256>,
}

impl LedgerState {
    /// Fresh state with zero totals.
    #[must_use]
    pub fn new(governance: Address, underlying_asset: Address, core: Address) -> Self {
        Self {
            governance,
            pending_governance: None,
            underlying_asset,
            core,
            shares: BTreeMap::new(),
            total_shares: U256::zero(),
            allowances: BTreeMap::new(),
        }
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn shares_of(&self, account: &Address) -> U256 {
        self.shares.get(account).copied().unwrap_or_default()
    }

    /// Sum of all shares.
    #[must_use]
    pub fn total_shares(&self) -> U256 {
        self.total_shares
    }

    /// Iterates over accounts holding shares.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.shares.iter()
    }

    /// Number of accounts holding shares.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.shares.len()
    }

    /// Remaining allowance of `spender` over `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrites an allowance; zero removes the entry.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Checks that `change` can be applied without failing.
    pub fn validate(&self, change: &ShareChange) -> Result<(), LedgerError> {
        match change {
            ShareChange::Mint { to, shares } => {
                self.total_shares
                    .checked_add(*shares)
                    .ok_or(LedgerError::ArithmeticOverflow)?;
                self.shares_of(to)
                    .checked_add(*shares)
                    .ok_or(LedgerError::ArithmeticOverflow)?;
                Ok(())
            }
            ShareChange::Burn { from, shares } => self.require_shares(from, *shares),
            ShareChange::Move { from, to, shares } => {
                self.require_shares(from, *shares)?;
                if from != to {
                    self.shares_of(to)
                        .checked_add(*shares)
                        .ok_or(LedgerError::ArithmeticOverflow)?;
                }
                Ok(())
            }
        }
    }

    /// Validates and applies `change`.
    pub fn apply(&mut self, change: &ShareChange) -> Result<(), LedgerError> {
        self.validate(change)?;
        match change {
            ShareChange::Mint { to, shares } => {
                self.credit(*to, *shares);
                self.total_shares += *shares;
            }
            ShareChange::Burn { from, shares } => {
                self.debit(*from, *shares);
                self.total_shares -= *shares;
            }
            ShareChange::Move { from, to, shares } => {
                if from != to {
                    self.debit(*from, *shares);
                    self.credit(*to, *shares);
                }
            }
        }
        Ok(())
    }

    fn require_shares(&self, account: &Address, required: U256) -> Result<(), LedgerError> {
        let available = self.shares_of(account);
        if available < required {
            return Err(LedgerError::InsufficientShares {
                required,
                available,
            });
        }
        Ok(())
    }

    // Callers validate first; these cannot overflow or underflow afterwards.
    fn credit(&mut self, account: Address, shares: U256) {
        if shares.is_zero() {
            return;
        }
        *self.shares.entry(account).or_default() += shares;
    }

    fn debit(&mut self, account: Address, shares: U256) {
        if shares.is_zero() {
            return;
        }
        let remaining = self.shares_of(&account) - shares;
        if remaining.is_zero() {
            self.shares.remove(&account);
        } else {
            self.shares.insert(account, remaining);
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Share count of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountShares {
    /// Account address.
    pub address: Address,
    /// Shares held.
    pub shares: U256,
}

/// Serializable point-in-time view of the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Current governance.
    pub governance: Address,
    /// Proposed successor, if any.
    pub pending_governance: Option<Address>,
    /// Underlying asset address.
    pub underlying_asset: Address,
    /// Rate source address.
    pub core: Address,
    /// Sum of all shares.
    pub total_shares: U256,
    /// Rate the snapshot was valued at.
    pub exchange_rate: ExchangeRate,
    /// `total_shares` valued at `exchange_rate`.
    pub total_supply: U256,
    /// Holders in address order.
    pub accounts: Vec<AccountShares>,
}

impl LedgerSnapshot {
    /// Builds a snapshot of `state` valued at `exchange_rate`.
    #[must_use]
    pub fn capture(state: &LedgerState, exchange_rate: ExchangeRate, total_supply: U256) -> Self {
        Self {
            governance: state.governance,
            pending_governance: state.pending_governance,
            underlying_asset: state.underlying_asset,
            core: state.core,
            total_shares: state.total_shares(),
            exchange_rate,
            total_supply,
            accounts: state
                .accounts()
                .map(|(address, shares)| AccountShares {
                    address: *address,
                    shares: *shares,
                })
                .collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

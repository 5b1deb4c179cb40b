//! # Driving Ports (API - Inbound)
//!
//! The wrapped-token surface offered to callers.

use crate::domain::value_objects::{Address, ExchangeRate, U256};
use crate::errors::LedgerError;

/// Primary wrapped-token API.
///
/// State-changing calls take the acting `caller` explicitly.
pub trait WrappedTokenApi: Send + Sync {
    /// Deposits `amount` underlying units and returns the shares minted.
    ///
    /// # Errors
    ///
    /// * `NotInitialized` - ledger not yet initialized
    /// * `InvalidRate` - rate source reports zero
    /// * `InvalidRecipient` - caller is zero or the ledger itself
    /// * `DustAmount` - deposit worth less than one share
    /// * `TransferFailed` - asset refused to pull the deposit
    fn mint(&self, caller: Address, amount: U256) -> Result<U256, LedgerError>;

    /// Redeems `amount` balance units and returns the underlying paid out.
    ///
    /// # Errors
    ///
    /// * `InsufficientShares` - amount exceeds the caller's balance
    /// * `TransferFailed` - asset refused to pay out
    fn burn(&self, caller: Address, amount: U256) -> Result<U256, LedgerError>;

    /// Redeems an exact share count and returns the underlying paid out.
    fn burn_shares(&self, caller: Address, shares: U256) -> Result<U256, LedgerError>;

    /// Moves `amount` balance units from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// * `InvalidRecipient` - `to` is zero or the ledger itself
    /// * `InsufficientShares` - amount exceeds the caller's balance
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<(), LedgerError>;

    /// Moves `amount` from `from` to `to` against `caller`'s allowance.
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Sets `spender`'s allowance over `caller`'s balance.
    fn approve(&self, caller: Address, spender: Address, amount: U256) -> Result<(), LedgerError>;

    /// Remaining allowance of `spender` over `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Balance of `account` at the current rate.
    fn balance_of(&self, account: Address) -> Result<U256, LedgerError>;

    /// Internal share count of `account`.
    fn shares_of(&self, account: Address) -> U256;

    /// Total shares valued at the current rate.
    fn total_supply(&self) -> Result<U256, LedgerError>;

    /// Sum of all shares.
    fn total_shares(&self) -> U256;

    /// Current exchange rate from the rate source.
    fn exchange_rate(&self) -> Result<ExchangeRate, LedgerError>;
}

/// Single-owner administration.
pub trait GovernanceApi: Send + Sync {
    /// Current governance address.
    fn governance(&self) -> Result<Address, LedgerError>;

    /// Proposed successor, if any.
    fn pending_governance(&self) -> Result<Option<Address>, LedgerError>;

    /// Proposes `new_governance`. Governance only.
    fn set_pending_governance(
        &self,
        caller: Address,
        new_governance: Address,
    ) -> Result<(), LedgerError>;

    /// Completes the hand-over. Pending governance only.
    fn accept_pending_governance(&self, caller: Address) -> Result<(), LedgerError>;
}

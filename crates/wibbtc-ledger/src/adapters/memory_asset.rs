//! # In-Memory Asset Adapter
//!
//! ERC-20 style underlying asset kept in memory.
//! Used by tests and by embedders that simulate the rebasing token.

use crate::domain::value_objects::{Address, U256};
use crate::errors::AssetError;
use crate::ports::outbound::UnderlyingAsset;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct AssetBook {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl AssetBook {
    fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> Result<(), AssetError> {
        let available = self.balance(&from);
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(&to)
            .checked_add(amount)
            .ok_or_else(|| AssetError::Other("balance overflow".to_string()))?;
        self.balances.insert(from, available - amount);
        self.balances.insert(to, credited);
        Ok(())
    }
}

/// In-memory ERC-20 balances and allowances.
#[derive(Debug, Default)]
pub struct InMemoryAsset {
    book: RwLock<AssetBook>,
    rejecting: AtomicBool,
}

impl InMemoryAsset {
    /// Create an asset with no balances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air.
    pub fn mint(&self, account: Address, amount: U256) {
        let mut book = self.book.write();
        let balance = book.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Set `spender`'s allowance over `owner`.
    pub fn approve(&self, owner: Address, spender: Address, amount: U256) {
        self.book.write().allowances.insert((owner, spender), amount);
    }

    /// Remaining allowance of `spender` over `owner`.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.book.read().allowance(&owner, &spender)
    }

    /// When set, every transfer is refused with `AssetError::Rejected`.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    fn check_accepting(&self) -> Result<(), AssetError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(AssetError::Rejected);
        }
        Ok(())
    }
}

impl UnderlyingAsset for InMemoryAsset {
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AssetError> {
        self.check_accepting()?;
        let mut book = self.book.write();
        let allowance = book.allowance(&from, &spender);
        if spender != from && allowance < amount {
            return Err(AssetError::InsufficientAllowance {
                required: amount,
                available: allowance,
            });
        }
        book.move_balance(from, to, amount)?;
        if spender != from {
            book.allowances.insert((from, spender), allowance - amount);
        }
        Ok(())
    }

    fn transfer(&self, sender: Address, to: Address, amount: U256) -> Result<(), AssetError> {
        self.check_accepting()?;
        self.book.write().move_balance(sender, to, amount)
    }

    fn balance_of(&self, account: Address) -> Result<U256, AssetError> {
        Ok(self.book.read().balance(&account))
    }
}

// =============================================================================
// TESTS
// =============================================================================

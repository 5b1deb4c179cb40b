//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the ledger depends on but does not implement:
//! - The underlying rebasing asset (ibBTC)
//! - The exchange-rate source (core)
//!
//! Both are synchronous and fallible. The ledger holds its lock across these
//! calls, so implementations must not call back into the ledger.

use crate::domain::value_objects::{Address, ExchangeRate, U256};
use crate::errors::{AssetError, RateError};

// =============================================================================
// UNDERLYING ASSET
// =============================================================================

/// ERC-20 style interface of the wrapped asset.
///
/// The acting address (`spender` / `sender`) is explicit because there is no
/// implicit message sender; the ledger always passes its own address.
pub trait UnderlyingAsset: Send + Sync {
    /// Moves `amount` from `from` to `to` using `spender`'s allowance.
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AssetError>;

    /// Moves `amount` from `sender` to `to`.
    fn transfer(&self, sender: Address, to: Address, amount: U256) -> Result<(), AssetError>;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> Result<U256, AssetError>;
}

// =============================================================================
// RATE SOURCE
// =============================================================================

/// Source of the share-to-balance exchange rate.
pub trait RateSource: Send + Sync {
    /// Current rate, fixed point at `RATE_PRECISION`.
    fn exchange_rate(&self) -> Result<ExchangeRate, RateError>;
}

impl<T: UnderlyingAsset + ?Sized> UnderlyingAsset for std::sync::Arc<T> {
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AssetError> {
        (**self).transfer_from(spender, from, to, amount)
    }

    fn transfer(&self, sender: Address, to: Address, amount: U256) -> Result<(), AssetError> {
        (**self).transfer(sender, to, amount)
    }

    fn balance_of(&self, account: Address) -> Result<U256, AssetError> {
        (**self).balance_of(account)
    }
}

impl<T: RateSource + ?Sized> RateSource for std::sync::Arc<T> {
    fn exchange_rate(&self) -> Result<ExchangeRate, RateError> {
        (**self).exchange_rate()
    }
}

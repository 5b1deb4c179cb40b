//! # Share Ledger Service
//!
//! The wrapped-token ledger bound to its underlying asset and rate source.
//!
//! ## Serialization
//!
//! One `parking_lot::Mutex` guards the whole ledger. Every operation, including
//! its collaborator calls, runs with the lock held, so mutations execute in a
//! single global order and never interleave.
//!
//! ## All-or-nothing
//!
//! Each mutation computes and validates its [`ShareChange`] first, then calls
//! the collaborator, and only then writes state. A failed collaborator call
//! therefore leaves the ledger untouched.

use crate::adapters::{FixedRateSource, InMemoryAsset};
use crate::config::LedgerConfig;
use crate::domain::entities::{LedgerSnapshot, LedgerState, ShareChange};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::services::{
    balance_for_shares, shares_for_deposit, shares_for_redemption, shares_for_transfer,
};
use crate::domain::value_objects::{Address, ExchangeRate, U256};
use crate::errors::LedgerError;
use crate::events::{EventLog, LedgerEvent};
use crate::ports::inbound::{GovernanceApi, WrappedTokenApi};
use crate::ports::outbound::{RateSource, UnderlyingAsset};

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// COLLABORATOR BINDING
// =============================================================================

/// A collaborator port together with the address it lives at.
#[derive(Debug, Clone)]
pub struct Collaborator<T> {
    /// On-chain address of the collaborator.
    pub address: Address,
    /// Port implementation.
    pub port: T,
}

impl<T> Collaborator<T> {
    /// Bind `port` to `address`.
    pub fn new(address: Address, port: T) -> Self {
        Self { address, port }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Operation kinds tracked in [`LedgerStats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Initialize,
    Mint,
    Burn,
    Transfer,
    Approve,
    Governance,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Transfer => "transfer",
            Self::Approve => "approve",
            Self::Governance => "governance",
        }
    }
}

/// Counters for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Successful mints.
    pub mints: u64,
    /// Successful burns (by amount or by shares).
    pub burns: u64,
    /// Successful transfers (direct or via allowance).
    pub transfers: u64,
    /// Successful approvals.
    pub approvals: u64,
    /// Successful governance actions.
    pub governance_actions: u64,
    /// Operations that returned an error.
    pub rejected_operations: u64,
    /// Rejections caused by a collaborator call.
    pub collaborator_failures: u64,
}

impl LedgerStats {
    fn record(&mut self, op: Operation, error: Option<&LedgerError>) {
        if let Some(err) = error {
            self.rejected_operations += 1;
            if err.is_collaborator_failure() {
                self.collaborator_failures += 1;
            }
            return;
        }
        match op {
            Operation::Initialize => {}
            Operation::Mint => self.mints += 1,
            Operation::Burn => self.burns += 1,
            Operation::Transfer => self.transfers += 1,
            Operation::Approve => self.approvals += 1,
            Operation::Governance => self.governance_actions += 1,
        }
    }
}

// =============================================================================
// LEDGER
// =============================================================================

struct Bound<A, R> {
    state: LedgerState,
    asset: A,
    rate_source: R,
}

impl<A: UnderlyingAsset, R: RateSource> Bound<A, R> {
    fn rate(&self) -> Result<ExchangeRate, LedgerError> {
        Ok(self.rate_source.exchange_rate()?)
    }
}

struct Inner<A, R> {
    bound: Option<Bound<A, R>>,
    events: EventLog,
    stats: LedgerStats,
}

/// The wrapped-token share ledger.
///
/// Starts `Uninitialized`; [`ShareLedger::initialize`] binds the collaborators
/// exactly once. Every mutation before that fails with `NotInitialized`.
pub struct ShareLedger<A, R> {
    config: LedgerConfig,
    address: Address,
    inner: Mutex<Inner<A, R>>,
}

impl<A: UnderlyingAsset, R: RateSource> ShareLedger<A, R> {
    /// Create an uninitialized ledger living at `address`.
    ///
    /// `address` is the custody account for deposited underlying.
    pub fn new(address: Address, config: LedgerConfig) -> Self {
        let events = EventLog::with_capacity(config.max_event_log);
        Self {
            config,
            address,
            inner: Mutex::new(Inner {
                bound: None,
                events,
                stats: LedgerStats::default(),
            }),
        }
    }

    /// Bind governance, the underlying asset and the rate source.
    ///
    /// # Errors
    ///
    /// * `AlreadyInitialized` - called more than once
    #[instrument(skip(self, underlying_asset, core), fields(ledger = %self.address))]
    pub fn initialize(
        &self,
        governance: Address,
        underlying_asset: Collaborator<A>,
        core: Collaborator<R>,
    ) -> Result<(), LedgerError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if inner.bound.is_some() {
            inner.stats.record(Operation::Initialize, Some(&LedgerError::AlreadyInitialized));
            warn!("Rejected repeated initialization");
            return Err(LedgerError::AlreadyInitialized);
        }

        inner.bound = Some(Bound {
            state: LedgerState::new(governance, underlying_asset.address, core.address),
            asset: underlying_asset.port,
            rate_source: core.port,
        });
        inner.events.record(LedgerEvent::Initialized {
            governance,
            underlying_asset: underlying_asset.address,
            core: core.address,
        });
        inner.stats.record(Operation::Initialize, None);

        info!(
            governance = %governance,
            underlying_asset = %underlying_asset.address,
            core = %core.address,
            "Share ledger initialized"
        );
        Ok(())
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().bound.is_some()
    }

    /// The ledger's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Token name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Token decimals.
    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    /// Address of the underlying asset.
    pub fn underlying_asset(&self) -> Result<Address, LedgerError> {
        self.read(|bound| Ok(bound.state.underlying_asset))
    }

    /// Address of the rate source.
    pub fn core(&self) -> Result<Address, LedgerError> {
        self.read(|bound| Ok(bound.state.core))
    }

    /// Replace the rate source. Governance only.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller is not governance
    #[instrument(skip(self, core), fields(core = %core.address))]
    pub fn set_core(&self, caller: Address, core: Collaborator<R>) -> Result<(), LedgerError> {
        self.mutate(Operation::Governance, |bound, events| {
            require_governance(&bound.state, caller)?;
            bound.state.core = core.address;
            bound.rate_source = core.port;
            events.record(LedgerEvent::SetCore { core: core.address });
            info!(core = %core.address, "Rate source replaced");
            Ok(())
        })
    }

    /// Shares worth `amount` balance units at the current rate, rounded down.
    pub fn balance_to_shares(&self, amount: U256) -> Result<U256, LedgerError> {
        self.read(|bound| shares_for_transfer(amount, bound.rate()?))
    }

    /// Balance units worth `shares` at the current rate, rounded down.
    pub fn shares_to_balance(&self, shares: U256) -> Result<U256, LedgerError> {
        self.read(|bound| balance_for_shares(shares, bound.rate()?))
    }

    /// Underlying held by the ledger, as reported by the asset.
    pub fn underlying_reserves(&self) -> Result<U256, LedgerError> {
        self.read(|bound| Ok(bound.asset.balance_of(self.address)?))
    }

    /// Serializable view of all holders, valued at the current rate.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        self.read(|bound| {
            let rate = bound.rate()?;
            let supply = balance_for_shares(bound.state.total_shares(), rate)?;
            Ok(LedgerSnapshot::capture(&bound.state, rate, supply))
        })
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.inner.lock().events.to_vec()
    }

    /// Current counters.
    pub fn stats(&self) -> LedgerStats {
        self.inner.lock().stats.clone()
    }

    /// Evaluate every accounting invariant at the current rate.
    pub fn check_invariants(&self) -> Result<InvariantCheckResult, LedgerError> {
        self.read(|bound| Ok(check_all_invariants(&bound.state, bound.rate()?)))
    }

    // -------------------------------------------------------------------------
    // internals
    // -------------------------------------------------------------------------

    fn read<T>(
        &self,
        f: impl FnOnce(&Bound<A, R>) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let guard = self.inner.lock();
        match guard.bound.as_ref() {
            Some(bound) => f(bound),
            None => Err(LedgerError::NotInitialized),
        }
    }

    fn mutate<T>(
        &self,
        op: Operation,
        f: impl FnOnce(&mut Bound<A, R>, &mut EventLog) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let result = match inner.bound.as_mut() {
            Some(bound) => f(bound, &mut inner.events),
            None => Err(LedgerError::NotInitialized),
        };
        inner.stats.record(op, result.as_ref().err());

        match (&result, inner.bound.as_ref()) {
            (Err(err), _) => {
                warn!(operation = op.as_str(), error = %err, "Ledger operation rejected");
            }
            (Ok(_), Some(bound)) if self.config.check_invariants => verify(bound, op),
            _ => {}
        }
        result
    }

    fn check_recipient(&self, to: Address) -> Result<(), LedgerError> {
        if to.is_zero() || to == self.address {
            return Err(LedgerError::InvalidRecipient(to));
        }
        Ok(())
    }

    /// Shared body of `transfer` and `transfer_from`.
    fn move_balance(
        &self,
        bound: &mut Bound<A, R>,
        events: &mut EventLog,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256, LedgerError> {
        self.check_recipient(to)?;
        let rate = bound.rate()?;

        // The sender must own `amount` in full, even though only the floored
        // share count moves.
        let required = shares_for_redemption(amount, rate)?;
        let available = bound.state.shares_of(&from);
        if required > available {
            return Err(LedgerError::InsufficientShares {
                required,
                available,
            });
        }

        let shares = shares_for_transfer(amount, rate)?;
        bound.state.apply(&ShareChange::Move { from, to, shares })?;
        events.record(LedgerEvent::Transfer {
            from,
            to,
            amount,
            shares,
        });
        debug!(from = %from, to = %to, amount = %amount, shares = %shares, "Shares moved");
        Ok(shares)
    }
}

fn require_governance(state: &LedgerState, caller: Address) -> Result<(), LedgerError> {
    if caller != state.governance {
        return Err(LedgerError::Unauthorized(caller));
    }
    Ok(())
}

fn verify<A: UnderlyingAsset, R: RateSource>(bound: &Bound<A, R>, op: Operation) {
    let Ok(rate) = bound.rate() else {
        return;
    };
    if let InvariantCheckResult::Invalid(violations) = check_all_invariants(&bound.state, rate) {
        for violation in &violations {
            error!(operation = op.as_str(), %violation, "Ledger invariant violated");
        }
    }
}

// =============================================================================
// WrappedTokenApi Implementation
// =============================================================================

impl<A: UnderlyingAsset, R: RateSource> WrappedTokenApi for ShareLedger<A, R> {
    #[instrument(skip(self), fields(caller = %caller, amount = %amount))]
    fn mint(&self, caller: Address, amount: U256) -> Result<U256, LedgerError> {
        self.mutate(Operation::Mint, |bound, events| {
            // The ledger's own account never holds shares.
            self.check_recipient(caller)?;
            if amount.is_zero() {
                return Ok(U256::zero());
            }
            let rate = bound.rate()?;
            let shares = shares_for_deposit(amount, rate)?;
            if shares.is_zero() {
                return Err(LedgerError::DustAmount { amount });
            }

            let change = ShareChange::Mint { to: caller, shares };
            bound.state.validate(&change)?;
            bound
                .asset
                .transfer_from(self.address, caller, self.address, amount)?;
            bound.state.apply(&change)?;

            events.record(LedgerEvent::Mint {
                to: caller,
                amount,
                shares,
                rate,
            });
            info!(shares = %shares, rate = %rate, "Minted wrapped balance");
            Ok(shares)
        })
    }

    #[instrument(skip(self), fields(caller = %caller, amount = %amount))]
    fn burn(&self, caller: Address, amount: U256) -> Result<U256, LedgerError> {
        self.mutate(Operation::Burn, |bound, events| {
            if amount.is_zero() {
                return Ok(U256::zero());
            }
            let rate = bound.rate()?;
            let shares = shares_for_redemption(amount, rate)?;

            let change = ShareChange::Burn {
                from: caller,
                shares,
            };
            bound.state.validate(&change)?;
            bound.asset.transfer(self.address, caller, amount)?;
            bound.state.apply(&change)?;

            events.record(LedgerEvent::Burn {
                from: caller,
                amount,
                shares,
                rate,
            });
            info!(shares = %shares, rate = %rate, "Burned wrapped balance");
            Ok(amount)
        })
    }

    #[instrument(skip(self), fields(caller = %caller, shares = %shares))]
    fn burn_shares(&self, caller: Address, shares: U256) -> Result<U256, LedgerError> {
        self.mutate(Operation::Burn, |bound, events| {
            if shares.is_zero() {
                return Ok(U256::zero());
            }
            let rate = bound.rate()?;
            if rate.is_zero() {
                return Err(LedgerError::InvalidRate);
            }
            let amount = balance_for_shares(shares, rate)?;

            let change = ShareChange::Burn {
                from: caller,
                shares,
            };
            bound.state.validate(&change)?;
            if !amount.is_zero() {
                bound.asset.transfer(self.address, caller, amount)?;
            }
            bound.state.apply(&change)?;

            events.record(LedgerEvent::Burn {
                from: caller,
                amount,
                shares,
                rate,
            });
            info!(amount = %amount, rate = %rate, "Burned shares");
            Ok(amount)
        })
    }

    #[instrument(skip(self), fields(caller = %caller, to = %to, amount = %amount))]
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        self.mutate(Operation::Transfer, |bound, events| {
            self.move_balance(bound, events, caller, to, amount)?;
            Ok(())
        })
    }

    #[instrument(skip(self), fields(caller = %caller, from = %from, to = %to, amount = %amount))]
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.mutate(Operation::Transfer, |bound, events| {
            let allowance = bound.state.allowance(&from, &caller);
            let spends_allowance = caller != from;
            if spends_allowance && allowance < amount {
                return Err(LedgerError::InsufficientAllowance {
                    required: amount,
                    available: allowance,
                });
            }

            self.move_balance(bound, events, from, to, amount)?;

            // A maximal allowance is treated as unlimited.
            if spends_allowance && allowance != U256::MAX {
                bound.state.set_allowance(from, caller, allowance - amount);
            }
            Ok(())
        })
    }

    #[instrument(skip(self), fields(caller = %caller, spender = %spender, amount = %amount))]
    fn approve(&self, caller: Address, spender: Address, amount: U256) -> Result<(), LedgerError> {
        self.mutate(Operation::Approve, |bound, events| {
            if spender.is_zero() {
                return Err(LedgerError::InvalidRecipient(spender));
            }
            bound.state.set_allowance(caller, spender, amount);
            events.record(LedgerEvent::Approval {
                owner: caller,
                spender,
                amount,
            });
            Ok(())
        })
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.read(|bound| Ok(bound.state.allowance(&owner, &spender)))
            .unwrap_or_default()
    }

    fn balance_of(&self, account: Address) -> Result<U256, LedgerError> {
        self.read(|bound| balance_for_shares(bound.state.shares_of(&account), bound.rate()?))
    }

    fn shares_of(&self, account: Address) -> U256 {
        self.read(|bound| Ok(bound.state.shares_of(&account)))
            .unwrap_or_default()
    }

    fn total_supply(&self) -> Result<U256, LedgerError> {
        self.read(|bound| balance_for_shares(bound.state.total_shares(), bound.rate()?))
    }

    fn total_shares(&self) -> U256 {
        self.read(|bound| Ok(bound.state.total_shares()))
            .unwrap_or_default()
    }

    fn exchange_rate(&self) -> Result<ExchangeRate, LedgerError> {
        self.read(|bound| bound.rate())
    }
}

// =============================================================================
// GovernanceApi Implementation
// =============================================================================

impl<A: UnderlyingAsset, R: RateSource> GovernanceApi for ShareLedger<A, R> {
    fn governance(&self) -> Result<Address, LedgerError> {
        self.read(|bound| Ok(bound.state.governance))
    }

    fn pending_governance(&self) -> Result<Option<Address>, LedgerError> {
        self.read(|bound| Ok(bound.state.pending_governance))
    }

    #[instrument(skip(self), fields(caller = %caller, pending = %new_governance))]
    fn set_pending_governance(
        &self,
        caller: Address,
        new_governance: Address,
    ) -> Result<(), LedgerError> {
        self.mutate(Operation::Governance, |bound, events| {
            require_governance(&bound.state, caller)?;
            bound.state.pending_governance = Some(new_governance);
            events.record(LedgerEvent::SetPendingGovernance {
                pending: new_governance,
            });
            info!("Governance successor proposed");
            Ok(())
        })
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn accept_pending_governance(&self, caller: Address) -> Result<(), LedgerError> {
        self.mutate(Operation::Governance, |bound, events| {
            let pending = bound
                .state
                .pending_governance
                .ok_or(LedgerError::NoPendingGovernance)?;
            if caller != pending {
                return Err(LedgerError::Unauthorized(caller));
            }
            bound.state.governance = pending;
            bound.state.pending_governance = None;
            events.record(LedgerEvent::AcceptPendingGovernance {
                governance: pending,
            });
            info!("Governance hand-over accepted");
            Ok(())
        })
    }
}

// =============================================================================
// IN-MEMORY DEPLOYMENT
// =============================================================================

/// Ledger wired to the in-memory adapters.
pub type InMemoryLedger = ShareLedger<Arc<InMemoryAsset>, Arc<FixedRateSource>>;

/// An initialized in-memory ledger with handles to its collaborators.
pub struct InMemoryDeployment {
    /// The ledger.
    pub ledger: InMemoryLedger,
    /// Underlying asset shared with the ledger.
    pub asset: Arc<InMemoryAsset>,
    /// Rate source shared with the ledger.
    pub rate: Arc<FixedRateSource>,
    /// Governance address the ledger was initialized with.
    pub governance: Address,
}

/// Well-known addresses used by [`create_test_ledger`].
pub mod test_addresses {
    use crate::domain::value_objects::Address;

    /// The ledger itself.
    pub const LEDGER: Address = Address::new([0x1E; 20]);
    /// Underlying asset.
    pub const ASSET: Address = Address::new([0xA5; 20]);
    /// Rate source.
    pub const CORE: Address = Address::new([0xC0; 20]);
    /// Governance.
    pub const GOVERNANCE: Address = Address::new([0x60; 20]);
}

/// Create an initialized ledger at a 1:1 rate (for testing).
#[must_use]
pub fn create_test_ledger() -> InMemoryDeployment {
    let asset = Arc::new(InMemoryAsset::new());
    let rate = Arc::new(FixedRateSource::one_to_one());
    let config = LedgerConfig {
        check_invariants: true,
        ..LedgerConfig::default()
    };
    let ledger = ShareLedger::new(test_addresses::LEDGER, config);
    // A fresh ledger cannot already be initialized.
    let _ = ledger.initialize(
        test_addresses::GOVERNANCE,
        Collaborator::new(test_addresses::ASSET, Arc::clone(&asset)),
        Collaborator::new(test_addresses::CORE, Arc::clone(&rate)),
    );
    InMemoryDeployment {
        ledger,
        asset,
        rate,
        governance: test_addresses::GOVERNANCE,
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Ledger Events
//!
//! Record of every successful state change, in commit order.
//! Amounts are wrapped-balance units unless the field says `shares`.

use crate::domain::value_objects::{Address, ExchangeRate, U256};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A committed ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Ledger bound to its collaborators.
    Initialized {
        governance: Address,
        underlying_asset: Address,
        core: Address,
    },
    /// Underlying deposited, shares created. `from` is the zero address.
    Mint {
        to: Address,
        amount: U256,
        shares: U256,
        rate: ExchangeRate,
    },
    /// Shares destroyed, underlying paid out.
    Burn {
        from: Address,
        amount: U256,
        shares: U256,
        rate: ExchangeRate,
    },
    /// Shares moved between holders.
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
        shares: U256,
    },
    /// Allowance set.
    Approval {
        owner: Address,
        spender: Address,
        amount: U256,
    },
    /// Governance proposed a successor.
    SetPendingGovernance { pending: Address },
    /// Successor accepted the role.
    AcceptPendingGovernance { governance: Address },
    /// Rate source replaced.
    SetCore { core: Address },
}

impl LedgerEvent {
    /// Short name used in log lines.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::Transfer { .. } => "transfer",
            Self::Approval { .. } => "approval",
            Self::SetPendingGovernance { .. } => "set_pending_governance",
            Self::AcceptPendingGovernance { .. } => "accept_pending_governance",
            Self::SetCore { .. } => "set_core",
        }
    }
}

/// Bounded event history; the oldest events drop out first.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: VecDeque<LedgerEvent>,
    capacity: usize,
    total_recorded: u64,
}

impl EventLog {
    /// Log keeping at most `capacity` events (`0` keeps all).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            total_recorded: 0,
        }
    }

    /// Append an event.
    pub fn record(&mut self, event: LedgerEvent) {
        if self.capacity > 0 && self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
        self.total_recorded += 1;
    }

    /// Retained events, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<LedgerEvent> {
        self.events.iter().cloned().collect()
    }

    /// Events ever recorded, including evicted ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

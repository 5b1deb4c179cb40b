//! # Rate Source Adapter
//!
//! Settable exchange rate standing in for the core's price-per-share.

use crate::domain::value_objects::{ExchangeRate, U256};
use crate::errors::RateError;
use crate::ports::outbound::RateSource;
use parking_lot::RwLock;

/// Rate source returning whatever rate was last set.
#[derive(Debug)]
pub struct FixedRateSource {
    rate: RwLock<Result<ExchangeRate, RateError>>,
}

impl FixedRateSource {
    /// Source reporting `rate`.
    #[must_use]
    pub fn new(rate: ExchangeRate) -> Self {
        Self {
            rate: RwLock::new(Ok(rate)),
        }
    }

    /// Source reporting 1:1.
    #[must_use]
    pub fn one_to_one() -> Self {
        Self::new(ExchangeRate::ONE)
    }

    /// Replace the reported rate.
    pub fn set_rate(&self, rate: ExchangeRate) {
        *self.rate.write() = Ok(rate);
    }

    /// Replace the reported rate from a raw fixed-point value.
    pub fn set_raw(&self, raw: U256) {
        self.set_rate(ExchangeRate::from_raw(raw));
    }

    /// Make every query fail with `error` until a rate is set again.
    pub fn fail_with(&self, error: RateError) {
        *self.rate.write() = Err(error);
    }
}

impl Default for FixedRateSource {
    fn default() -> Self {
        Self::one_to_one()
    }
}

impl RateSource for FixedRateSource {
    fn exchange_rate(&self) -> Result<ExchangeRate, RateError> {
        self.rate.read().clone()
    }
}

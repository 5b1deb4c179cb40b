//! # Value Objects
//!
//! Immutable domain primitives for share accounting.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit arithmetic
pub use primitive_types::U256;
use primitive_types::U512;

/// Fixed-point precision of the exchange rate (1e18).
pub const RATE_PRECISION: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// =============================================================================
// EXCHANGE RATE
// =============================================================================

/// Share-to-balance exchange rate, fixed point at [`RATE_PRECISION`].
///
/// A rate of `RATE_PRECISION` means one share is worth one balance unit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ExchangeRate(U256);

impl ExchangeRate {
    /// The 1:1 rate.
    pub const ONE: Self = Self(RATE_PRECISION);

    /// Wraps a raw fixed-point rate.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw fixed-point value.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// A zero rate cannot be used for conversions into shares.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExchangeRate({})", self.0)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, frac) = self.0.div_mod(RATE_PRECISION);
        write!(f, "{whole}.{:018}", frac.low_u64())
    }
}

// =============================================================================
// ROUNDING
// =============================================================================

/// Rounding direction for `a * b / d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Toward zero.
    Down,
    /// Away from zero.
    Up,
}

/// Computes `a * b / d` with a 512-bit intermediate.
///
/// Returns `None` when `d` is zero or the quotient does not fit in 256 bits.
#[must_use]
pub fn mul_div(a: U256, b: U256, d: U256, rounding: Rounding) -> Option<U256> {
    if d.is_zero() {
        return None;
    }
    let (quotient, remainder) = a.full_mul(b).div_mod(U512::from(d));
    let quotient = if rounding == Rounding::Up && !remainder.is_zero() {
        quotient.checked_add(U512::one())?
    } else {
        quotient
    };
    U256::try_from(quotient).ok()
}

// =============================================================================
// TESTS
// =============================================================================

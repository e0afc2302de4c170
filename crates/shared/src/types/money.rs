//! Integer-cent money type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All ledger arithmetic runs on an exact `i64` cent count; decimal values
//! exist only at the boundary where legacy two-decimal amounts enter or
//! leave the core.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur converting boundary decimals into cents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The decimal value does not fit into the `i64` cent range.
    #[error("amount {0} does not fit into the cent range")]
    OutOfRange(Decimal),
}

/// A signed monetary amount as an exact number of cents.
///
/// Legacy inputs arrive as two-decimal amounts (often converted from
/// floating point upstream); they are rounded to the nearest cent once,
/// here, and every later computation is exact integer arithmetic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// One cent, the indivisible allocation unit.
    pub const CENT: Self = Self(1);

    /// Creates an amount from a raw cent count.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw cent count.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a two-decimal boundary value into cents.
    ///
    /// Rounds to the nearest cent, half away from zero. Inputs are already
    /// at scale 2, so the rounding only matters for values that picked up
    /// sub-cent noise upstream.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::OutOfRange`] if the value does not fit in
    /// an `i64` cent count.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(MoneyError::OutOfRange(value))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        cents.to_i64().map(Self).ok_or(MoneyError::OutOfRange(value))
    }

    /// Returns the exact two-decimal representation.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns true if the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Overflow-aware addition.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Overflow-aware subtraction.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::ops::Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

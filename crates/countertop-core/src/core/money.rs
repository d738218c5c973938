// crates/countertop-core/src/core/money.rs
// ============================================================================
// Module: Countertop Money
// Description: Exact monetary amounts stored as integer cents.
// Purpose: Keep totals and subtotals free of floating point drift.
// Dependencies: bigdecimal, serde, thiserror
// ============================================================================

//! ## Overview
//! Amounts are held as `i64` hundredths of the currency unit. User input is
//! parsed through [`BigDecimal`] so arbitrary decimal strings round to exactly
//! two places before conversion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of cents in one currency unit.
const CENTS_PER_UNIT: i64 = 100;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing or computing money amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// Input is negative.
    #[error("amount must not be negative: {0}")]
    Negative(String),
    /// Amount does not fit the cent representation.
    #[error("amount out of range")]
    Overflow,
}

// ============================================================================
// SECTION: Money
// ============================================================================

/// Monetary amount in cents.
///
/// # Invariants
/// - Values produced by [`Money::parse`] are never negative.
/// - Arithmetic helpers are checked and report [`MoneyError::Overflow`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from raw cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw cent value.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parses a decimal string, rounding to two places.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] when the input is not a non-negative decimal that
    /// fits in `i64` cents.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        let value = BigDecimal::from_str(trimmed)
            .map_err(|_| MoneyError::Invalid(trimmed.to_string()))?;
        // Sign is checked before rounding so `-0.001` cannot become zero.
        if trimmed.starts_with('-') || value < BigDecimal::from(0) {
            return Err(MoneyError::Negative(trimmed.to_string()));
        }
        let scaled = value.round(2) * BigDecimal::from(CENTS_PER_UNIT);
        let cents = scaled.to_i64().ok_or(MoneyError::Overflow)?;
        Ok(Self(cents))
    }

    /// Multiplies the amount by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] when the product does not fit.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, MoneyError> {
        self.0.checked_mul(i64::from(quantity)).map(Self).ok_or(MoneyError::Overflow)
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] when the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        self.0.checked_add(other.0).map(Self).ok_or(MoneyError::Overflow)
    }

    /// Sums amounts, failing instead of wrapping or saturating.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] when the running total does not fit.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Result<Self, MoneyError> {
        amounts.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }

    /// Returns a display wrapper that prefixes the currency symbol.
    #[must_use]
    pub const fn with_symbol(self, symbol: &str) -> MoneyDisplay<'_> {
        MoneyDisplay {
            amount: self,
            symbol,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let units = magnitude / CENTS_PER_UNIT.unsigned_abs();
        let cents = magnitude % CENTS_PER_UNIT.unsigned_abs();
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Currency-prefixed money display (for example `Q15.00`).
pub struct MoneyDisplay<'a> {
    /// Amount to render.
    amount: Money,
    /// Currency symbol prefix.
    symbol: &'a str,
}

impl fmt::Display for MoneyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, self.amount)
    }
}

// crates/countertop-core/src/runtime/cart.rs
// ============================================================================
// Module: Countertop Cart
// Description: In-progress order lines with merge-by-price semantics.
// Purpose: Accumulate cashier input before a sale is closed.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Adding a product that is already in the cart at the same unit price grows
//! the existing line; the same product at a different price opens a new line.
//! Subtotals are recomputed from quantity and price on every change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Money;
use crate::core::MoneyError;
use crate::core::SaleLine;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Cart mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity must be at least one.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    /// Line index does not exist.
    #[error("cart line {index} does not exist (cart has {len} lines)")]
    LineOutOfRange {
        /// Requested zero-based index.
        index: usize,
        /// Current number of lines.
        len: usize,
    },
    /// Arithmetic overflow.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

// ============================================================================
// SECTION: Cart
// ============================================================================

/// Order lines awaiting a sale.
///
/// # Invariants
/// - No two lines share both product name and unit price.
/// - Every line satisfies `subtotal == unit_price * quantity`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<SaleLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
        }
    }

    /// Rebuilds a cart from recorded sale lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<SaleLine>) -> Self {
        Self {
            lines,
        }
    }

    /// Adds units of a product at a unit price, merging with a matching line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] for zero quantities or arithmetic overflow.
    pub fn add(&mut self, product: &str, quantity: u32, unit_price: Money) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product == product && line.unit_price == unit_price)
        {
            let merged = line.quantity.checked_add(quantity).ok_or(MoneyError::Overflow)?;
            line.subtotal = unit_price.checked_mul(merged)?;
            line.quantity = merged;
            return Ok(());
        }
        let subtotal = unit_price.checked_mul(quantity)?;
        self.lines.push(SaleLine {
            product: product.to_string(),
            quantity,
            unit_price,
            subtotal,
        });
        Ok(())
    }

    /// Removes the line at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineOutOfRange`] when the index does not exist.
    pub fn remove(&mut self, index: usize) -> Result<SaleLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Returns the cart total.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Money`] when the sum overflows.
    pub fn total(&self) -> Result<Money, CartError> {
        let mut total = Money::ZERO;
        for line in &self.lines {
            total = total.checked_add(line.subtotal)?;
        }
        Ok(total)
    }

    /// Returns the lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

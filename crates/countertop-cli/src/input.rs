// crates/countertop-cli/src/input.rs
// ============================================================================
// Module: CLI Input Parsing
// Description: Parsers for item specifications, waiter names, and line indexes.
// Purpose: Turn untrusted command-line arguments into register operations.
// Dependencies: countertop-core, thiserror
// ============================================================================

//! ## Overview
//! Items are written `<name-or-id>[:qty][@price]`. The name or id is resolved
//! later against the catalog; quantity defaults to one and the price defaults
//! to the catalog base price. Line indexes for removal are one-based, as shown
//! by `sale show`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::str::FromStr;

use countertop_core::Money;
use countertop_core::MoneyError;
use countertop_core::WaiterName;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The product part of an item is empty.
    #[error("item must name a product")]
    EmptyItem,
    /// Quantity is not a positive whole number.
    #[error("quantity must be a whole number greater than zero: {0}")]
    Quantity(String),
    /// Price override is not a valid amount.
    #[error(transparent)]
    Price(#[from] MoneyError),
    /// Line index is outside the ticket.
    #[error("line {index} does not exist (the ticket has {count} lines)")]
    LineOutOfRange {
        /// Requested one-based index.
        index: usize,
        /// Lines on the ticket.
        count: usize,
    },
}

// ============================================================================
// SECTION: Item Specifications
// ============================================================================

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    /// Product id or name prefix.
    pub query: String,
    /// Units to add.
    pub quantity: u32,
    /// Unit price override.
    pub price: Option<Money>,
}

impl ItemSpec {
    /// Parses `<name-or-id>[:qty][@price]`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when a part is empty or malformed.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let (rest, price) = match input.rsplit_once('@') {
            Some((rest, price)) => (rest, Some(Money::parse(price)?)),
            None => (input, None),
        };
        let (query, quantity) = match rest.rsplit_once(':') {
            Some((query, quantity)) => (query, parse_quantity(quantity)?),
            None => (rest, 1),
        };
        let query = query.trim();
        if query.is_empty() {
            return Err(InputError::EmptyItem);
        }
        Ok(Self {
            query: query.to_string(),
            quantity,
            price,
        })
    }
}

impl FromStr for ItemSpec {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses a positive quantity.
fn parse_quantity(value: &str) -> Result<u32, InputError> {
    let trimmed = value.trim();
    match trimmed.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(InputError::Quantity(trimmed.to_string())),
    }
}

// ============================================================================
// SECTION: Waiters and Lines
// ============================================================================

/// Resolves a typed waiter name to its roster spelling.
///
/// Matching ignores case and surrounding whitespace. Unmatched input is
/// returned trimmed so the register can reject it by name.
#[must_use]
pub fn resolve_waiter(roster: &[WaiterName], input: &str) -> WaiterName {
    let trimmed = input.trim();
    let needle = trimmed.to_lowercase();
    roster
        .iter()
        .find(|waiter| waiter.as_str().to_lowercase() == needle)
        .cloned()
        .unwrap_or_else(|| WaiterName::new(trimmed))
}

/// Converts one-based line indexes into zero-based removal order.
///
/// Duplicates collapse and the result is descending, so removing in order
/// never shifts a line that is still pending removal.
///
/// # Errors
///
/// Returns [`InputError::LineOutOfRange`] for zero or indexes past `count`.
pub fn removal_order(indexes: &[usize], count: usize) -> Result<Vec<usize>, InputError> {
    let mut unique = BTreeSet::new();
    for &index in indexes {
        if index == 0 || index > count {
            return Err(InputError::LineOutOfRange {
                index,
                count,
            });
        }
        unique.insert(index - 1);
    }
    Ok(unique.into_iter().rev().collect())
}

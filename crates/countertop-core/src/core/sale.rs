// crates/countertop-core/src/core/sale.rs
// ============================================================================
// Module: Countertop Sale Records
// Description: Recorded sales, their lines, and report summaries.
// Purpose: Canonical shapes shared by the register, stores, and CLI output.
// Dependencies: crate::core::{identifiers, money, time}, serde
// ============================================================================

//! ## Overview
//! A [`Sale`] is the persisted outcome of closing a cart: a correlative
//! ticket, the responsible waiter, and the priced lines. Lines hold the
//! product name by value so catalog changes never rewrite history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;

use crate::core::identifiers::SaleId;
use crate::core::identifiers::TicketNumber;
use crate::core::identifiers::WaiterName;
use crate::core::money::Money;
use crate::core::money::MoneyError;
use crate::core::time::SaleTimestamp;

// ============================================================================
// SECTION: Lines
// ============================================================================

/// One priced line of a cart or recorded sale.
///
/// # Invariants
/// - `quantity` is greater than zero.
/// - `subtotal == unit_price * quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Product name at the time of sale.
    pub product: String,
    /// Units sold.
    pub quantity: u32,
    /// Applied unit price (may differ from the catalog base price).
    pub unit_price: Money,
    /// Line subtotal.
    pub subtotal: Money,
}

// ============================================================================
// SECTION: Sales
// ============================================================================

/// Sale content submitted to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    /// Responsible waiter.
    pub waiter: WaiterName,
    /// Sale total.
    pub total: Money,
    /// Priced lines in cart order.
    pub lines: Vec<SaleLine>,
}

/// Persisted sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Internal sale identifier.
    pub id: SaleId,
    /// Correlative ticket number.
    pub ticket: TicketNumber,
    /// Local time the sale was first recorded.
    pub recorded_at: SaleTimestamp,
    /// Responsible waiter.
    pub waiter: WaiterName,
    /// Sale total.
    pub total: Money,
    /// Priced lines in cart order.
    pub lines: Vec<SaleLine>,
}

impl Sale {
    /// Returns the summary row for reports.
    #[must_use]
    pub fn summary(&self) -> SaleSummary {
        SaleSummary {
            ticket: self.ticket,
            recorded_at: self.recorded_at,
            waiter: self.waiter.clone(),
            total: self.total,
        }
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSummary {
    /// Correlative ticket number.
    pub ticket: TicketNumber,
    /// Local time the sale was recorded.
    pub recorded_at: SaleTimestamp,
    /// Responsible waiter.
    pub waiter: WaiterName,
    /// Sale total.
    pub total: Money,
}

/// Report selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilter {
    /// Every recorded sale.
    All,
    /// Sales recorded on the given local date.
    Day(Date),
}

impl ReportFilter {
    /// Returns true when the summary is selected by this filter.
    #[must_use]
    pub fn matches(&self, summary: &SaleSummary) -> bool {
        match self {
            Self::All => true,
            Self::Day(date) => summary.recorded_at.date() == *date,
        }
    }
}

/// Sales report with its aggregate.
///
/// # Invariants
/// - `entries` are ordered by ticket descending.
/// - `total_sold` equals the sum of entry totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Selected sales.
    pub entries: Vec<SaleSummary>,
    /// Sum of selected totals.
    pub total_sold: Money,
}

impl SalesReport {
    /// Builds a report, ordering entries by ticket descending.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] when the totals do not fit in one amount.
    pub fn from_entries(mut entries: Vec<SaleSummary>) -> Result<Self, MoneyError> {
        entries.sort_by(|left, right| right.ticket.cmp(&left.ticket));
        let total_sold = Money::checked_sum(entries.iter().map(|entry| entry.total))?;
        Ok(Self {
            entries,
            total_sold,
        })
    }
}

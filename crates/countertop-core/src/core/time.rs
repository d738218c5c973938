// crates/countertop-core/src/core/time.rs
// ============================================================================
// Module: Countertop Time Model
// Description: Local wall-clock timestamps recorded on sales.
// Purpose: Provide a stable textual form for storage and receipt rendering.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Sales record the local time they were closed as `YYYY-MM-DD HH:MM:SS`.
//! The core never reads the clock; hosts supply [`SaleTimestamp`] values when
//! closing a sale and a [`Date`] when filtering reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Storage format for sale timestamps.
const STORAGE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Storage format for report dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Short receipt format.
const RECEIPT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year repr:last_two] [hour]:[minute]");

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Local time at which a sale was recorded.
///
/// # Invariants
/// - Second precision; sub-second components are dropped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SaleTimestamp(PrimitiveDateTime);

impl SaleTimestamp {
    /// Wraps a local date-time, truncating to whole seconds.
    #[must_use]
    pub fn new(value: PrimitiveDateTime) -> Self {
        Self(value.replace_nanosecond(0).unwrap_or(value))
    }

    /// Parses the storage form `YYYY-MM-DD HH:MM:SS`.
    ///
    /// # Errors
    ///
    /// Returns [`time::error::Parse`] when the text is malformed.
    pub fn parse(text: &str) -> Result<Self, time::error::Parse> {
        PrimitiveDateTime::parse(text, STORAGE_FORMAT).map(Self)
    }

    /// Returns the calendar date of the timestamp.
    #[must_use]
    pub const fn date(self) -> Date {
        self.0.date()
    }

    /// Renders the storage form.
    #[must_use]
    pub fn to_storage(self) -> String {
        self.0.format(STORAGE_FORMAT).unwrap_or_default()
    }

    /// Renders the short receipt form `dd/mm/yy HH:MM`.
    #[must_use]
    pub fn to_receipt(self) -> String {
        self.0.format(RECEIPT_FORMAT).unwrap_or_default()
    }
}

impl fmt::Display for SaleTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage())
    }
}

impl TryFrom<String> for SaleTimestamp {
    type Error = time::error::Parse;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SaleTimestamp> for String {
    fn from(value: SaleTimestamp) -> Self {
        value.to_storage()
    }
}

/// Renders a date in storage form `YYYY-MM-DD`.
#[must_use]
pub fn date_to_storage(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

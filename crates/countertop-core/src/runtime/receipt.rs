// crates/countertop-core/src/runtime/receipt.rs
// ============================================================================
// Module: Countertop Receipt Rendering
// Description: Plain-text receipt layout for narrow thermal printers.
// Purpose: Render recorded sales as printable text and write receipt files.
// Dependencies: crate::core, std::fs
// ============================================================================

//! ## Overview
//! A receipt is a fixed-width text block: title, ticket number, sale time,
//! attendant, one row per line, total, and footer. Product names wider than
//! [`ReceiptOptions::name_width`] are cut and marked with a trailing `.`.
//! The sale time printed is the recorded time, so reprints match the
//! original receipt.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::core::Sale;
use crate::core::TicketNumber;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default product column width in characters.
pub const DEFAULT_NAME_WIDTH: usize = 10;
/// Quantity column width in characters.
const QUANTITY_WIDTH: usize = 4;
/// Amount column width in characters.
const AMOUNT_WIDTH: usize = 10;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Receipt labels and layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptOptions {
    /// Title for first prints.
    pub title: String,
    /// Title for reprints after an edit.
    pub reprint_title: String,
    /// Closing line.
    pub footer: String,
    /// Label before the waiter name.
    pub attendant_label: String,
    /// Product column header.
    pub product_header: String,
    /// Quantity column header.
    pub quantity_header: String,
    /// Amount column header.
    pub amount_header: String,
    /// Maximum product name characters before truncation.
    pub name_width: usize,
    /// Currency symbol prefix.
    pub currency_symbol: String,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        Self {
            title: "COUNTERTOP".to_string(),
            reprint_title: "MODIFIED TICKET".to_string(),
            footer: "THANK YOU FOR YOUR VISIT!".to_string(),
            attendant_label: "Attends".to_string(),
            product_header: "PROD".to_string(),
            quantity_header: "C.".to_string(),
            amount_header: "TOT".to_string(),
            name_width: DEFAULT_NAME_WIDTH,
            currency_symbol: "Q".to_string(),
        }
    }
}

impl ReceiptOptions {
    /// Returns the full receipt width in characters.
    #[must_use]
    pub const fn width(&self) -> usize {
        // Truncated names carry one extra character for the marker.
        self.name_width + 1 + 1 + QUANTITY_WIDTH + 1 + AMOUNT_WIDTH
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Shortens a product name to `width` characters, marking cuts with `.`.
#[must_use]
pub fn shorten_name(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        let mut short: String = name.chars().take(width).collect();
        short.push('.');
        short
    } else {
        name.to_string()
    }
}

/// Renders the receipt text for a sale.
#[must_use]
pub fn render_receipt(sale: &Sale, reprint: bool, options: &ReceiptOptions) -> String {
    let width = options.width();
    let name_col = options.name_width + 1;
    let qty_col = QUANTITY_WIDTH;
    let amount_col = AMOUNT_WIDTH;
    let rule = "-".repeat(width);
    let title = if reprint { &options.reprint_title } else { &options.title };
    let symbol = options.currency_symbol.as_str();

    let mut out = String::new();
    let _ = writeln!(out, "{title:^width$}");
    let _ = writeln!(out, "{:^width$}", format!("#{}", sale.ticket));
    let _ = writeln!(out, "{:^width$}", sale.recorded_at.to_receipt());
    let _ = writeln!(
        out,
        "{:^width$}",
        format!("{}: {}", options.attendant_label, sale.waiter.as_str().to_uppercase())
    );
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<name_col$} {:^qty_col$} {:>amount_col$}",
        options.product_header, options.quantity_header, options.amount_header
    );
    let _ = writeln!(out, "{rule}");
    for line in &sale.lines {
        let _ = writeln!(
            out,
            "{:<name_col$} {:^qty_col$} {:>amount_col$}",
            shorten_name(&line.product, options.name_width),
            line.quantity,
            line.subtotal.with_symbol(symbol).to_string()
        );
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:>width$}", format!("TOTAL: {}", sale.total.with_symbol(symbol)));
    let _ = writeln!(out);
    let _ = writeln!(out, "{:^width$}", options.footer);
    out
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Returns the receipt file path for a ticket.
#[must_use]
pub fn receipt_path(output_dir: &Path, ticket: TicketNumber) -> PathBuf {
    output_dir.join(format!("ticket_{ticket}.txt"))
}

/// Writes receipt text to `<output_dir>/ticket_<n>.txt`, replacing any
/// earlier print of the same ticket.
///
/// # Errors
///
/// Returns an I/O error when the directory or file cannot be written.
pub fn write_receipt(output_dir: &Path, ticket: TicketNumber, text: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = receipt_path(output_dir, ticket);
    fs::write(&path, text)?;
    Ok(path)
}

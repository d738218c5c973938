// crates/countertop-cli/src/lib.rs
// ============================================================================
// Module: Countertop CLI Library
// Description: Shared helpers for the countertop binary.
// Purpose: Expose the message catalog and input parsers to the binary and tests.
// Dependencies: countertop-core, thiserror
// ============================================================================

//! ## Overview
//! Library half of the `countertop` binary. It holds the localized message
//! catalog behind the [`t!`] macro and the parsers that turn command-line
//! item and line arguments into register operations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;
pub mod input;
#[cfg(test)]
mod tests;

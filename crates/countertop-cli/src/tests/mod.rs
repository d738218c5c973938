// crates/countertop-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Library Unit Tests
// Description: Unit test modules for crate-private CLI helpers.
// ============================================================================

//! ## Overview
//! Groups unit tests that need access to crate-private catalog helpers.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

mod i18n;

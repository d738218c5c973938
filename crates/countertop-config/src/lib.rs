// crates/countertop-config/src/lib.rs
// ============================================================================
// Module: Countertop Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for countertop.toml semantics.
// Dependencies: countertop-core, countertop-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `countertop-config` defines the configuration model for the Countertop
//! point of sale: database location, waiter roster, receipt labels, audit
//! and logging outputs, and first-run seed data. Validation is strict and
//! fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;

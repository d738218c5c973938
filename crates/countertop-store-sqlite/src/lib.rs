// crates/countertop-store-sqlite/src/lib.rs
// ============================================================================
// Module: Countertop SQLite Store
// Description: Durable PosStore backend using a local SQLite file.
// Purpose: Persist users, catalog, and sales for a single point of sale.
// Dependencies: countertop-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`PosStore`] implementation. Ticket
//! numbers come from a dedicated sequence row updated in the same
//! transaction as the sale insert, so a number is never handed out twice,
//! even after a void. Database contents are treated as untrusted and are
//! validated when read back.
//!
//! [`PosStore`]: countertop_core::PosStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SeedReport;
pub use store::SeedUser;
pub use store::SqlitePosStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;

// crates/countertop-core/src/lib.rs
// ============================================================================
// Module: Countertop Core Library
// Description: Public API surface for the Countertop point-of-sale core.
// Purpose: Expose domain types, the store interface, and runtime workflows.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Countertop core models a single-location point of sale: a product
//! catalog, a cart that merges repeated items by price, a register that
//! closes sales under a correlative ticket sequence or edits them in place,
//! printable receipts, and manager reports. It is backend-agnostic and
//! persists through the [`PosStore`] interface.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::AuditEvent;
pub use audit::AuditKind;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::PosStore;
pub use interfaces::StoreError;
pub use interfaces::StoredCredentials;
pub use runtime::BackOffice;
pub use runtime::BackOfficeError;
pub use runtime::Cart;
pub use runtime::CartError;
pub use runtime::ClosedSale;
pub use runtime::InMemoryPosStore;
pub use runtime::ReceiptOptions;
pub use runtime::Register;
pub use runtime::RegisterError;
pub use runtime::RegisterMode;
pub use runtime::authenticate;
pub use runtime::render_receipt;
pub use runtime::write_receipt;

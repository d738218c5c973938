// crates/countertop-core/src/runtime/mod.rs
// ============================================================================
// Module: Countertop Runtime
// Description: Cart, register workflow, back office, receipts, in-memory store.
// Purpose: Execute point-of-sale workflows against any PosStore backend.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the cashier and manager workflows. The CLI and
//! tests drive the same [`Register`] and [`BackOffice`] logic so every
//! frontend shares one set of rules.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod backoffice;
pub mod cart;
pub mod receipt;
pub mod register;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use backoffice::BackOffice;
pub use backoffice::BackOfficeError;
pub use backoffice::authenticate;
pub use cart::Cart;
pub use cart::CartError;
pub use receipt::ReceiptOptions;
pub use receipt::render_receipt;
pub use receipt::write_receipt;
pub use register::ClosedSale;
pub use register::Register;
pub use register::RegisterError;
pub use register::RegisterMode;
pub use store::InMemoryPosStore;

// crates/countertop-core/src/core/mod.rs
// ============================================================================
// Module: Countertop Core Types
// Description: Canonical catalog, sale, money, and user structures.
// Purpose: Provide stable, serializable types shared by stores and the CLI.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Countertop core types define catalog products, recorded sales, report
//! rows, money amounts, and operator identities. These types are the
//! canonical source of truth for every store backend and CLI output.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod auth;
pub mod catalog;
pub mod identifiers;
pub mod money;
pub mod sale;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use auth::Action;
pub use auth::AuthError;
pub use auth::PasswordDigest;
pub use auth::Role;
pub use auth::User;
pub use catalog::Catalog;
pub use catalog::NewProduct;
pub use catalog::Product;
pub use identifiers::ProductId;
pub use identifiers::SaleId;
pub use identifiers::TicketNumber;
pub use identifiers::UserName;
pub use identifiers::WaiterName;
pub use money::Money;
pub use money::MoneyError;
pub use sale::ReportFilter;
pub use sale::Sale;
pub use sale::SaleDraft;
pub use sale::SaleLine;
pub use sale::SaleSummary;
pub use sale::SalesReport;
pub use self::time::SaleTimestamp;
pub use self::time::date_to_storage;

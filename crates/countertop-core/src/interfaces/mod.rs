// crates/countertop-core/src/interfaces/mod.rs
// ============================================================================
// Module: Countertop Interfaces
// Description: Backend-agnostic storage interface for catalog, users, and sales.
// Purpose: Define the contract surface used by the register and CLI.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! [`PosStore`] is the only seam between the point-of-sale workflow and its
//! persistence backend. Implementations must assign ticket numbers
//! atomically with the sale insert and must never reissue a ticket number.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::NewProduct;
use crate::core::PasswordDigest;
use crate::core::Product;
use crate::core::ProductId;
use crate::core::ReportFilter;
use crate::core::Role;
use crate::core::Sale;
use crate::core::SaleDraft;
use crate::core::SaleId;
use crate::core::SaleTimestamp;
use crate::core::SalesReport;
use crate::core::TicketNumber;
use crate::core::User;
use crate::core::UserName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Point-of-sale store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("pos store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("pos store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("pos store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("pos store invalid data: {0}")]
    Invalid(String),
    /// A unique value already exists.
    #[error("pos store duplicate: {0}")]
    Duplicate(String),
    /// A referenced record does not exist.
    #[error("pos store not found: {0}")]
    NotFound(String),
    /// Store reported an error.
    #[error("pos store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Stored credentials for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// User identity and role.
    pub user: User,
    /// Salted password digest.
    pub digest: PasswordDigest,
}

/// Persistence for users, catalog, and sales.
pub trait PosStore {
    /// Loads stored credentials for a user name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load_credentials(&self, name: &UserName) -> Result<Option<StoredCredentials>, StoreError>;

    /// Inserts a user unless one with the same name exists.
    ///
    /// Returns `true` when a new user was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn insert_user_if_absent(
        &self,
        name: &UserName,
        digest: &PasswordDigest,
        role: Role,
    ) -> Result<bool, StoreError>;

    /// Lists catalog products ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Adds a catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] when the name is taken.
    fn add_product(&self, product: &NewProduct) -> Result<Product, StoreError>;

    /// Removes a catalog product. Returns `true` when a product was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn remove_product(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Returns the ticket number the next registered sale will receive.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the sequence cannot be read.
    fn next_ticket(&self) -> Result<TicketNumber, StoreError>;

    /// Records a new sale under the next ticket number.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the sale cannot be persisted.
    fn register_sale(
        &self,
        draft: &SaleDraft,
        recorded_at: SaleTimestamp,
    ) -> Result<Sale, StoreError>;

    /// Replaces the waiter, total, and lines of an existing sale.
    ///
    /// The ticket number and recorded time are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the sale does not exist.
    fn update_sale(&self, id: SaleId, draft: &SaleDraft) -> Result<Sale, StoreError>;

    /// Loads a sale by ticket number.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn sale_by_ticket(&self, ticket: TicketNumber) -> Result<Option<Sale>, StoreError>;

    /// Deletes a sale and its lines. Returns `true` when a sale was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn void_sale(&self, ticket: TicketNumber) -> Result<bool, StoreError>;

    /// Builds a sales report for the filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn sales_report(&self, filter: ReportFilter) -> Result<SalesReport, StoreError>;

    /// Reports store readiness.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

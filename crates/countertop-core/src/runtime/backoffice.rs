// crates/countertop-core/src/runtime/backoffice.rs
// ============================================================================
// Module: Countertop Back Office
// Description: Login, catalog maintenance, voids, and sales reporting.
// Purpose: Apply role checks and audit records around store operations.
// Dependencies: crate::{audit, core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! Back-office operations wrap [`PosStore`] calls with the operator's role
//! check and one audit event per mutation. Authentication reports the same
//! error for an unknown user and a wrong password.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::audit::AuditEvent;
use crate::audit::AuditKind;
use crate::audit::AuditSink;
use crate::core::Action;
use crate::core::AuthError;
use crate::core::Catalog;
use crate::core::NewProduct;
use crate::core::Product;
use crate::core::ProductId;
use crate::core::ReportFilter;
use crate::core::Sale;
use crate::core::SalesReport;
use crate::core::TicketNumber;
use crate::core::User;
use crate::core::UserName;
use crate::interfaces::PosStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Back-office errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackOfficeError {
    /// Authentication or authorization failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Product does not exist.
    #[error("product {0} does not exist")]
    ProductNotFound(ProductId),
    /// Ticket does not exist.
    #[error("ticket #{0} does not exist")]
    TicketNotFound(TicketNumber),
}

// ============================================================================
// SECTION: Authentication
// ============================================================================

/// Verifies credentials and records a login event.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for unknown users and wrong
/// passwords alike.
pub fn authenticate<S: PosStore>(
    store: &S,
    audit: &dyn AuditSink,
    name: &str,
    password: &str,
) -> Result<User, BackOfficeError> {
    let name = UserName::new(name.trim());
    let Some(stored) = store.load_credentials(&name)? else {
        return Err(AuthError::InvalidCredentials.into());
    };
    if !stored.digest.verify(password) {
        return Err(AuthError::InvalidCredentials.into());
    }
    audit.record(&AuditEvent::new(AuditKind::Login, stored.user.name.as_str(), stored.user.role));
    Ok(stored.user)
}

// ============================================================================
// SECTION: Back Office
// ============================================================================

/// Role-checked store operations for an authenticated operator.
pub struct BackOffice<'a, S: PosStore> {
    /// Backing store.
    store: &'a S,
    /// Logged-in operator.
    operator: &'a User,
    /// Audit sink for mutations.
    audit: &'a dyn AuditSink,
}

impl<'a, S: PosStore> BackOffice<'a, S> {
    /// Binds back-office operations to an operator.
    #[must_use]
    pub const fn new(store: &'a S, operator: &'a User, audit: &'a dyn AuditSink) -> Self {
        Self {
            store,
            operator,
            audit,
        }
    }

    /// Loads the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError`] when the operator is not permitted or the
    /// store fails.
    pub fn catalog(&self) -> Result<Catalog, BackOfficeError> {
        self.operator.require(Action::ReadCatalog)?;
        Ok(Catalog::new(self.store.list_products()?))
    }

    /// Adds a catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError`] when the operator is not a manager or the
    /// name is already taken.
    pub fn add_product(&self, product: &NewProduct) -> Result<Product, BackOfficeError> {
        self.operator.require(Action::EditCatalog)?;
        let created = self.store.add_product(product)?;
        self.audit.record(
            &self
                .event(AuditKind::ProductAdded)
                .with_product(created.id)
                .with_subject(created.name.as_str())
                .with_amount(created.base_price),
        );
        Ok(created)
    }

    /// Removes a catalog product. Recorded sales keep their product names.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError::ProductNotFound`] when the id is unknown.
    pub fn remove_product(&self, id: ProductId) -> Result<(), BackOfficeError> {
        self.operator.require(Action::EditCatalog)?;
        if !self.store.remove_product(id)? {
            return Err(BackOfficeError::ProductNotFound(id));
        }
        self.audit.record(&self.event(AuditKind::ProductRemoved).with_product(id));
        Ok(())
    }

    /// Loads a recorded sale.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError::TicketNotFound`] when the ticket is unknown.
    pub fn sale(&self, ticket: TicketNumber) -> Result<Sale, BackOfficeError> {
        self.operator.require(Action::ShowSale)?;
        self.store.sale_by_ticket(ticket)?.ok_or(BackOfficeError::TicketNotFound(ticket))
    }

    /// Voids a recorded sale. The ticket number is never reissued.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError::TicketNotFound`] when the ticket is unknown.
    pub fn void_sale(&self, ticket: TicketNumber) -> Result<(), BackOfficeError> {
        self.operator.require(Action::VoidSale)?;
        if !self.store.void_sale(ticket)? {
            return Err(BackOfficeError::TicketNotFound(ticket));
        }
        self.audit.record(&self.event(AuditKind::SaleVoided).with_ticket(ticket));
        Ok(())
    }

    /// Builds a sales report.
    ///
    /// # Errors
    ///
    /// Returns [`BackOfficeError`] when the operator is not a manager or the
    /// query fails.
    pub fn report(&self, filter: ReportFilter) -> Result<SalesReport, BackOfficeError> {
        self.operator.require(Action::ViewReports)?;
        Ok(self.store.sales_report(filter)?)
    }

    /// Starts an audit event for the operator.
    fn event(&self, kind: AuditKind) -> AuditEvent {
        AuditEvent::new(kind, self.operator.name.as_str(), self.operator.role)
    }
}

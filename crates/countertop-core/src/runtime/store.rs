// crates/countertop-core/src/runtime/store.rs
// ============================================================================
// Module: Countertop In-Memory Store
// Description: Simple in-memory point-of-sale store for tests and demos.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides an in-memory implementation of [`PosStore`] with the
//! same numbering rules as the durable backend: tickets come from a
//! monotonic counter and voided numbers are never reissued. It is not
//! intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

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
use crate::interfaces::PosStore;
use crate::interfaces::StoreError;
use crate::interfaces::StoredCredentials;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable store contents.
#[derive(Debug, Default)]
struct MemoryState {
    /// Users keyed by login name.
    users: BTreeMap<String, (PasswordDigest, Role)>,
    /// Products keyed by raw id.
    products: BTreeMap<u64, Product>,
    /// Last product id handed out.
    last_product_id: u64,
    /// Last ticket number handed out.
    last_ticket: u64,
    /// Last sale id handed out.
    last_sale_id: u64,
    /// Sales keyed by raw ticket number.
    sales: BTreeMap<u64, Sale>,
}

/// In-memory point-of-sale store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPosStore {
    /// Store state protected by a mutex.
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryPosStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store state.
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Store("pos store mutex poisoned".to_string()))
    }
}

/// Builds a non-zero identifier from a counter value.
fn allocate(counter: &mut u64, label: &str) -> Result<u64, StoreError> {
    let next = counter
        .checked_add(1)
        .ok_or_else(|| StoreError::Invalid(format!("{label} counter exhausted")))?;
    *counter = next;
    Ok(next)
}

impl PosStore for InMemoryPosStore {
    fn load_credentials(&self, name: &UserName) -> Result<Option<StoredCredentials>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.users.get(name.as_str()).map(|(digest, role)| StoredCredentials {
            user: User {
                name: name.clone(),
                role: *role,
            },
            digest: digest.clone(),
        }))
    }

    fn insert_user_if_absent(
        &self,
        name: &UserName,
        digest: &PasswordDigest,
        role: Role,
    ) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        if guard.users.contains_key(name.as_str()) {
            return Ok(false);
        }
        guard.users.insert(name.as_str().to_string(), (digest.clone(), role));
        Ok(true)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.products.values().cloned().collect())
    }

    fn add_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        let mut guard = self.lock()?;
        if guard.products.values().any(|existing| existing.name == product.name) {
            return Err(StoreError::Duplicate(format!("product name {}", product.name)));
        }
        let raw = allocate(&mut guard.last_product_id, "product")?;
        let id = ProductId::from_raw(raw)
            .ok_or_else(|| StoreError::Invalid("product id must be non-zero".to_string()))?;
        let created = Product {
            id,
            name: product.name.clone(),
            base_price: product.base_price,
        };
        guard.products.insert(raw, created.clone());
        Ok(created)
    }

    fn remove_product(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.products.remove(&id.get()).is_some())
    }

    fn next_ticket(&self) -> Result<TicketNumber, StoreError> {
        let guard = self.lock()?;
        guard
            .last_ticket
            .checked_add(1)
            .and_then(TicketNumber::from_raw)
            .ok_or_else(|| StoreError::Invalid("ticket sequence exhausted".to_string()))
    }

    fn register_sale(
        &self,
        draft: &SaleDraft,
        recorded_at: SaleTimestamp,
    ) -> Result<Sale, StoreError> {
        let mut guard = self.lock()?;
        let ticket_raw = allocate(&mut guard.last_ticket, "ticket")?;
        let sale_raw = allocate(&mut guard.last_sale_id, "sale")?;
        let ticket = TicketNumber::from_raw(ticket_raw)
            .ok_or_else(|| StoreError::Invalid("ticket must be non-zero".to_string()))?;
        let id = SaleId::from_raw(sale_raw)
            .ok_or_else(|| StoreError::Invalid("sale id must be non-zero".to_string()))?;
        let sale = Sale {
            id,
            ticket,
            recorded_at,
            waiter: draft.waiter.clone(),
            total: draft.total,
            lines: draft.lines.clone(),
        };
        guard.sales.insert(ticket_raw, sale.clone());
        Ok(sale)
    }

    fn update_sale(&self, id: SaleId, draft: &SaleDraft) -> Result<Sale, StoreError> {
        let mut guard = self.lock()?;
        let sale = guard
            .sales
            .values_mut()
            .find(|sale| sale.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("sale {id}")))?;
        sale.waiter = draft.waiter.clone();
        sale.total = draft.total;
        sale.lines = draft.lines.clone();
        Ok(sale.clone())
    }

    fn sale_by_ticket(&self, ticket: TicketNumber) -> Result<Option<Sale>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.sales.get(&ticket.get()).cloned())
    }

    fn void_sale(&self, ticket: TicketNumber) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.sales.remove(&ticket.get()).is_some())
    }

    fn sales_report(&self, filter: ReportFilter) -> Result<SalesReport, StoreError> {
        let guard = self.lock()?;
        let entries = guard
            .sales
            .values()
            .map(Sale::summary)
            .filter(|summary| filter.matches(summary))
            .collect();
        SalesReport::from_entries(entries).map_err(|err| StoreError::Invalid(err.to_string()))
    }
}

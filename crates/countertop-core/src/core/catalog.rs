// crates/countertop-core/src/core/catalog.rs
// ============================================================================
// Module: Countertop Catalog
// Description: Product records and catalog lookup helpers.
// Purpose: Resolve cashier input (id or name prefix) to catalog products.
// Dependencies: crate::core::{identifiers, money}, serde
// ============================================================================

//! ## Overview
//! Products carry a unique name and a base price. [`Catalog`] is a read-only
//! snapshot ordered by product id, used by the register to resolve cashier
//! input through [`Catalog::smart_search`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ProductId;
use crate::core::money::Money;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Catalog product.
///
/// # Invariants
/// - `name` is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Default unit price.
    pub base_price: Money,
}

/// Product creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Trimmed product name.
    pub name: String,
    /// Default unit price.
    pub base_price: Money,
}

impl NewProduct {
    /// Builds a product request, trimming the name.
    ///
    /// Returns `None` when the trimmed name is empty.
    #[must_use]
    pub fn new(name: &str, base_price: Money) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            base_price,
        })
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Ordered snapshot of catalog products.
///
/// # Invariants
/// - Products are sorted by id ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Products sorted by id.
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog snapshot, sorting products by id.
    #[must_use]
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by_key(|product| product.id);
        Self {
            products,
        }
    }

    /// Returns the products in id order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns true when the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Finds a product by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name == name)
    }

    /// Finds a product by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Resolves cashier input to a product.
    ///
    /// All-digit input is matched against product ids; anything else matches
    /// the first product whose name starts with the input, ignoring case.
    #[must_use]
    pub fn smart_search(&self, query: &str) -> Option<&Product> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if query.bytes().all(|byte| byte.is_ascii_digit()) {
            let id = query.parse::<u64>().ok().and_then(ProductId::from_raw)?;
            return self.find_by_id(id);
        }
        let needle = query.to_lowercase();
        self.products.iter().find(|product| product.name.to_lowercase().starts_with(&needle))
    }
}

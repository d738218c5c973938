// crates/countertop-core/src/runtime/register.rs
// ============================================================================
// Module: Countertop Register
// Description: Cashier workflow for new sales and edit-in-place of recorded sales.
// Purpose: Own the cart, the register mode, and the close-sale rules.
// Dependencies: crate::{audit, core, interfaces, runtime::cart}, thiserror
// ============================================================================

//! ## Overview
//! The [`Register`] starts in [`RegisterMode::New`]. Loading a recorded sale
//! switches it to [`RegisterMode::Editing`], where closing the cart rewrites
//! that sale in place instead of issuing a new ticket. Closing always clears
//! the cart and returns the register to `New`.
//!
//! ## Invariants
//! - A sale is never closed without a rostered waiter and a non-empty cart.
//! - Edits keep the sale id, ticket number, and original recorded time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::audit::AuditEvent;
use crate::audit::AuditKind;
use crate::audit::AuditSink;
use crate::core::Action;
use crate::core::AuthError;
use crate::core::Money;
use crate::core::Sale;
use crate::core::SaleDraft;
use crate::core::SaleId;
use crate::core::SaleTimestamp;
use crate::core::TicketNumber;
use crate::core::User;
use crate::core::WaiterName;
use crate::interfaces::PosStore;
use crate::interfaces::StoreError;
use crate::runtime::cart::Cart;
use crate::runtime::cart::CartError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Register workflow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// No waiter was selected.
    #[error("a waiter must be selected before closing the sale")]
    WaiterRequired,
    /// Waiter is not in the roster.
    #[error("waiter {0} is not in the roster")]
    UnknownWaiter(String),
    /// Cart has no lines.
    #[error("the cart is empty")]
    EmptyCart,
    /// Ticket does not exist.
    #[error("ticket #{0} does not exist")]
    TicketNotFound(TicketNumber),
    /// Operator is not permitted.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Register mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterMode {
    /// Building a new sale.
    New,
    /// Editing a recorded sale in place.
    Editing {
        /// Sale being edited.
        sale_id: SaleId,
        /// Ticket of the sale being edited.
        ticket: TicketNumber,
    },
}

/// Result of closing the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSale {
    /// Persisted sale.
    pub sale: Sale,
    /// True when the sale was an edit of a recorded sale.
    pub reprint: bool,
}

// ============================================================================
// SECTION: Register
// ============================================================================

/// Cashier register bound to a store, operator, and waiter roster.
pub struct Register<'a, S: PosStore> {
    /// Backing store.
    store: &'a S,
    /// Logged-in operator.
    operator: &'a User,
    /// Waiters who may be named responsible for a sale.
    roster: &'a [WaiterName],
    /// Audit sink for closed sales.
    audit: &'a dyn AuditSink,
    /// Lines being assembled.
    cart: Cart,
    /// Current mode.
    mode: RegisterMode,
}

impl<'a, S: PosStore> Register<'a, S> {
    /// Opens a register for an operator.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Auth`] when the operator may not register sales.
    pub fn open(
        store: &'a S,
        operator: &'a User,
        roster: &'a [WaiterName],
        audit: &'a dyn AuditSink,
    ) -> Result<Self, RegisterError> {
        operator.require(Action::RegisterSale)?;
        Ok(Self {
            store,
            operator,
            roster,
            audit,
            cart: Cart::new(),
            mode: RegisterMode::New,
        })
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> RegisterMode {
        self.mode
    }

    /// Returns the cart being assembled.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds units of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Cart`] for invalid quantities.
    pub fn add(&mut self, product: &str, quantity: u32, unit_price: Money) -> Result<(), RegisterError> {
        self.cart.add(product, quantity, unit_price)?;
        Ok(())
    }

    /// Removes a cart line by zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Cart`] when the index does not exist.
    pub fn remove(&mut self, index: usize) -> Result<(), RegisterError> {
        self.cart.remove(index)?;
        Ok(())
    }

    /// Returns the ticket that closing the cart would produce or rewrite.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Store`] when the sequence cannot be read.
    pub fn next_ticket(&self) -> Result<TicketNumber, RegisterError> {
        match self.mode {
            RegisterMode::New => Ok(self.store.next_ticket()?),
            RegisterMode::Editing {
                ticket, ..
            } => Ok(ticket),
        }
    }

    /// Loads a recorded sale into the cart for editing.
    ///
    /// Any lines already in the cart are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::TicketNotFound`] when the ticket is unknown.
    pub fn begin_edit(&mut self, ticket: TicketNumber) -> Result<Sale, RegisterError> {
        self.operator.require(Action::EditSale)?;
        let sale =
            self.store.sale_by_ticket(ticket)?.ok_or(RegisterError::TicketNotFound(ticket))?;
        self.cart = Cart::from_lines(sale.lines.clone());
        self.mode = RegisterMode::Editing {
            sale_id: sale.id,
            ticket: sale.ticket,
        };
        Ok(sale)
    }

    /// Abandons an edit, clearing the cart and returning to new-sale mode.
    pub fn cancel_edit(&mut self) {
        self.cart.clear();
        self.mode = RegisterMode::New;
    }

    /// Returns true when the waiter belongs to the roster.
    #[must_use]
    pub fn is_rostered(&self, waiter: &WaiterName) -> bool {
        self.roster.contains(waiter)
    }

    /// Closes the cart as a new sale or as an in-place edit.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError`] when the waiter or cart is invalid or the
    /// store rejects the write. The cart is kept intact on failure.
    pub fn finish(
        &mut self,
        waiter: Option<&WaiterName>,
        recorded_at: SaleTimestamp,
    ) -> Result<ClosedSale, RegisterError> {
        let waiter = waiter.ok_or(RegisterError::WaiterRequired)?;
        if !self.is_rostered(waiter) {
            return Err(RegisterError::UnknownWaiter(waiter.to_string()));
        }
        if self.cart.is_empty() {
            return Err(RegisterError::EmptyCart);
        }
        let draft = SaleDraft {
            waiter: waiter.clone(),
            total: self.cart.total()?,
            lines: self.cart.lines().to_vec(),
        };
        let closed = match self.mode {
            RegisterMode::New => {
                let sale = self.store.register_sale(&draft, recorded_at)?;
                self.record(AuditKind::SaleRegistered, &sale);
                ClosedSale {
                    sale,
                    reprint: false,
                }
            }
            RegisterMode::Editing {
                sale_id, ..
            } => {
                let sale = self.store.update_sale(sale_id, &draft)?;
                self.record(AuditKind::SaleUpdated, &sale);
                ClosedSale {
                    sale,
                    reprint: true,
                }
            }
        };
        self.cancel_edit();
        Ok(closed)
    }

    /// Records an audit event for a closed sale.
    fn record(&self, kind: AuditKind, sale: &Sale) {
        let event = AuditEvent::new(kind, self.operator.name.as_str(), self.operator.role)
            .with_ticket(sale.ticket)
            .with_subject(sale.waiter.as_str())
            .with_amount(sale.total);
        self.audit.record(&event);
    }
}

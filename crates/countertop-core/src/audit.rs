// crates/countertop-core/src/audit.rs
// ============================================================================
// Module: Countertop Audit Logging
// Description: Structured audit events for sales and catalog changes.
// Purpose: Emit JSON-line audit records without hard logging dependencies.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every business mutation (login, catalog change, sale registered, edited,
//! or voided) produces one [`AuditEvent`]. Sinks serialize events as single
//! JSON lines so operators can route them to any log pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::Money;
use crate::core::ProductId;
use crate::core::Role;
use crate::core::TicketNumber;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// Successful login.
    Login,
    /// Catalog product added.
    ProductAdded,
    /// Catalog product removed.
    ProductRemoved,
    /// New sale recorded.
    SaleRegistered,
    /// Existing sale edited in place.
    SaleUpdated,
    /// Sale voided.
    SaleVoided,
}

/// Audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event: AuditKind,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operator who performed the action.
    pub actor: String,
    /// Operator role.
    pub role: Role,
    /// Ticket involved, when applicable.
    pub ticket: Option<TicketNumber>,
    /// Product involved, when applicable.
    pub product_id: Option<ProductId>,
    /// Product or waiter name, when applicable.
    pub subject: Option<String>,
    /// Sale total or product price, when applicable.
    pub amount: Option<Money>,
}

impl AuditEvent {
    /// Creates an event for an actor with a consistent timestamp.
    #[must_use]
    pub fn new(event: AuditKind, actor: &str, role: Role) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            actor: actor.to_string(),
            role,
            ticket: None,
            product_id: None,
            subject: None,
            amount: None,
        }
    }

    /// Attaches a ticket number.
    #[must_use]
    pub fn with_ticket(mut self, ticket: TicketNumber) -> Self {
        self.ticket = Some(ticket);
        self
    }

    /// Attaches a product identifier.
    #[must_use]
    pub fn with_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Attaches a subject label.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attaches an amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for business events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

// crates/countertop-store-sqlite/src/store.rs
// ============================================================================
// Module: Countertop SQLite Store
// Description: Durable PosStore backed by SQLite.
// Purpose: Persist users, catalog products, and sales with correlative tickets.
// Dependencies: countertop-core, rusqlite, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! This module implements [`PosStore`] over a single `SQLite` connection.
//! Every mutation that touches more than one row runs in one transaction:
//! registering a sale advances `ticket_sequence` and inserts the sale and its
//! lines together; edits replace the lines wholesale; voids cascade to lines.
//! Rows read back are validated and fail closed on corruption.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use countertop_core::Money;
use countertop_core::NewProduct;
use countertop_core::PasswordDigest;
use countertop_core::PosStore;
use countertop_core::Product;
use countertop_core::ProductId;
use countertop_core::ReportFilter;
use countertop_core::Role;
use countertop_core::Sale;
use countertop_core::SaleDraft;
use countertop_core::SaleId;
use countertop_core::SaleLine;
use countertop_core::SaleSummary;
use countertop_core::SaleTimestamp;
use countertop_core::SalesReport;
use countertop_core::StoreError;
use countertop_core::StoredCredentials;
use countertop_core::TicketNumber;
use countertop_core::User;
use countertop_core::UserName;
use countertop_core::WaiterName;
use countertop_core::date_to_storage;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` point-of-sale store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Builds a configuration with default pragmas for a database path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store corruption.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Unique constraint violated.
    #[error("sqlite store duplicate: {0}")]
    Duplicate(String),
    /// Referenced row does not exist.
    #[error("sqlite store not found: {0}")]
    NotFound(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::Duplicate(message) => Self::Duplicate(message),
            SqliteStoreError::NotFound(message) => Self::NotFound(message),
        }
    }
}

/// Maps an engine error, keeping unique violations distinct.
fn db_error(err: &rusqlite::Error, subject: &str) -> SqliteStoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = err
        && failure.code == ErrorCode::ConstraintViolation
        && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    {
        return SqliteStoreError::Duplicate(subject.to_string());
    }
    SqliteStoreError::Db(err.to_string())
}

/// Maps an engine error with no special cases.
#[allow(clippy::needless_pass_by_value, reason = "Used directly as a map_err adapter.")]
fn db(err: rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Seeding
// ============================================================================

/// User inserted on first open when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    /// Login name.
    pub name: UserName,
    /// Clear-text password, digested before storage.
    pub password: String,
    /// Assigned role.
    pub role: Role,
}

/// Outcome of seeding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Users newly inserted.
    pub users_inserted: usize,
    /// Products newly inserted.
    pub products_inserted: usize,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed point-of-sale store.
#[derive(Clone)]
pub struct SqlitePosStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqlitePosStore {
    /// Opens the store, creating the file and schema when needed.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// its schema version is unsupported.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        debug!(path = %config.path.display(), "opened sqlite pos store");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Inserts absent users and, when the catalog is empty, the seed products.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when any insert fails.
    pub fn seed(
        &self,
        users: &[SeedUser],
        products: &[NewProduct],
    ) -> Result<SeedReport, StoreError> {
        let mut report = SeedReport::default();
        for user in users {
            if self.load_credentials(&user.name)?.is_some() {
                continue;
            }
            let digest = PasswordDigest::derive(&user.password);
            if self.insert_user_if_absent(&user.name, &digest, user.role)? {
                report.users_inserted += 1;
            }
        }
        if self.list_products()?.is_empty() {
            for product in products {
                self.add_product(product)?;
                report.products_inserted += 1;
            }
        }
        if report != SeedReport::default() {
            info!(
                users = report.users_inserted,
                products = report.products_inserted,
                "seeded pos store"
            );
        }
        Ok(report)
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Loads credentials for a user.
    fn load_credentials_row(
        &self,
        name: &UserName,
    ) -> Result<Option<StoredCredentials>, SqliteStoreError> {
        let guard = self.lock()?;
        let row = guard
            .query_row(
                "SELECT password_salt, password_hash, role FROM users WHERE name = ?1",
                params![name.as_str()],
                |row| {
                    let salt: String = row.get(0)?;
                    let hash: String = row.get(1)?;
                    let role: String = row.get(2)?;
                    Ok((salt, hash, role))
                },
            )
            .optional()
            .map_err(db)?;
        drop(guard);
        let Some((salt, hash, role)) = row else {
            return Ok(None);
        };
        let role = role
            .parse::<Role>()
            .map_err(|err| SqliteStoreError::Corrupt(format!("user {name}: {err}")))?;
        Ok(Some(StoredCredentials {
            user: User {
                name: name.clone(),
                role,
            },
            digest: PasswordDigest {
                salt,
                hash,
            },
        }))
    }

    /// Inserts a user unless the name is taken.
    fn insert_user_row(
        &self,
        name: &UserName,
        digest: &PasswordDigest,
        role: Role,
    ) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let inserted = guard
            .execute(
                "INSERT INTO users (name, password_salt, password_hash, role) VALUES (?1, ?2, \
                 ?3, ?4) ON CONFLICT(name) DO NOTHING",
                params![name.as_str(), digest.salt, digest.hash, role.as_str()],
            )
            .map_err(db)?;
        Ok(inserted > 0)
    }

    /// Lists catalog products by id.
    fn list_product_rows(&self) -> Result<Vec<Product>, SqliteStoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare("SELECT id, name, base_price_cents FROM products ORDER BY id")
            .map_err(db)?;
        let rows = statement
            .query_map(params![], |row| {
                let id: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                let price: i64 = row.get(2)?;
                Ok((id, name, price))
            })
            .map_err(db)?;
        let mut products = Vec::new();
        for row in rows {
            let (id, name, price) = row.map_err(db)?;
            products.push(Product {
                id: product_id_from_row(id)?,
                name,
                base_price: money_from_row(price, "product price")?,
            });
        }
        Ok(products)
    }

    /// Inserts a catalog product.
    fn insert_product_row(&self, product: &NewProduct) -> Result<Product, SqliteStoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO products (name, base_price_cents) VALUES (?1, ?2)",
                params![product.name, product.base_price.cents()],
            )
            .map_err(|err| db_error(&err, &format!("product name {}", product.name)))?;
        let id = product_id_from_row(guard.last_insert_rowid())?;
        drop(guard);
        Ok(Product {
            id,
            name: product.name.clone(),
            base_price: product.base_price,
        })
    }

    /// Deletes a catalog product.
    fn delete_product_row(&self, id: ProductId) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let deleted = guard
            .execute("DELETE FROM products WHERE id = ?1", params![to_sql_int(id.get())?])
            .map_err(db)?;
        Ok(deleted > 0)
    }

    /// Reads the next ticket number without consuming it.
    fn peek_ticket(&self) -> Result<TicketNumber, SqliteStoreError> {
        let guard = self.lock()?;
        let last = read_last_ticket(&guard)?;
        drop(guard);
        ticket_after(last)
    }

    /// Inserts a sale under the next ticket number.
    fn insert_sale(
        &self,
        draft: &SaleDraft,
        recorded_at: SaleTimestamp,
    ) -> Result<Sale, SqliteStoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db)?;
        let last = read_last_ticket(&tx)?;
        let ticket = ticket_after(last)?;
        let ticket_value = to_sql_int(ticket.get())?;
        tx.execute("UPDATE ticket_sequence SET last_ticket = ?1 WHERE id = 1", params![ticket_value])
            .map_err(db)?;
        tx.execute(
            "INSERT INTO sales (ticket, recorded_at, total_cents, waiter) VALUES (?1, ?2, ?3, ?4)",
            params![
                ticket_value,
                recorded_at.to_storage(),
                draft.total.cents(),
                draft.waiter.as_str()
            ],
        )
        .map_err(|err| db_error(&err, &format!("ticket {ticket}")))?;
        let sale_id = sale_id_from_row(tx.last_insert_rowid())?;
        insert_lines(&tx, sale_id, &draft.lines)?;
        tx.commit().map_err(db)?;
        drop(guard);
        debug!(ticket = ticket.get(), "registered sale");
        Ok(Sale {
            id: sale_id,
            ticket,
            recorded_at,
            waiter: draft.waiter.clone(),
            total: draft.total,
            lines: draft.lines.clone(),
        })
    }

    /// Rewrites a sale in place.
    fn rewrite_sale(&self, id: SaleId, draft: &SaleDraft) -> Result<Sale, SqliteStoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db)?;
        let sale_value = to_sql_int(id.get())?;
        let updated = tx
            .execute(
                "UPDATE sales SET total_cents = ?1, waiter = ?2 WHERE id = ?3",
                params![draft.total.cents(), draft.waiter.as_str(), sale_value],
            )
            .map_err(db)?;
        if updated == 0 {
            return Err(SqliteStoreError::NotFound(format!("sale {id}")));
        }
        tx.execute("DELETE FROM sale_lines WHERE sale_id = ?1", params![sale_value]).map_err(db)?;
        insert_lines(&tx, id, &draft.lines)?;
        let sale = load_sale(&tx, SaleKey::Id(sale_value))?
            .ok_or_else(|| SqliteStoreError::Corrupt(format!("sale {id} vanished during edit")))?;
        tx.commit().map_err(db)?;
        drop(guard);
        debug!(ticket = sale.ticket.get(), "updated sale in place");
        Ok(sale)
    }

    /// Loads a sale by ticket.
    fn sale_row(&self, ticket: TicketNumber) -> Result<Option<Sale>, SqliteStoreError> {
        let guard = self.lock()?;
        load_sale(&guard, SaleKey::Ticket(to_sql_int(ticket.get())?))
    }

    /// Deletes a sale and, by cascade, its lines.
    fn delete_sale(&self, ticket: TicketNumber) -> Result<bool, SqliteStoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db)?;
        let deleted = tx
            .execute("DELETE FROM sales WHERE ticket = ?1", params![to_sql_int(ticket.get())?])
            .map_err(db)?;
        tx.commit().map_err(db)?;
        drop(guard);
        if deleted > 0 {
            debug!(ticket = ticket.get(), "voided sale");
        }
        Ok(deleted > 0)
    }

    /// Builds a report for the filter.
    fn report_rows(&self, filter: ReportFilter) -> Result<SalesReport, SqliteStoreError> {
        let guard = self.lock()?;
        let (sql, day) = match filter {
            ReportFilter::All => (
                "SELECT ticket, recorded_at, waiter, total_cents FROM sales ORDER BY ticket DESC",
                None,
            ),
            ReportFilter::Day(date) => (
                "SELECT ticket, recorded_at, waiter, total_cents FROM sales WHERE \
                 substr(recorded_at, 1, 10) = ?1 ORDER BY ticket DESC",
                Some(date_to_storage(date)),
            ),
        };
        let mut statement = guard.prepare(sql).map_err(db)?;
        let mapper = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, String, String, i64)> {
            let ticket: i64 = row.get(0)?;
            let recorded_at: String = row.get(1)?;
            let waiter: String = row.get(2)?;
            let total: i64 = row.get(3)?;
            Ok((ticket, recorded_at, waiter, total))
        };
        let rows = match &day {
            Some(day) => statement.query_map(params![day], mapper),
            None => statement.query_map(params![], mapper),
        }
        .map_err(db)?;
        let mut entries = Vec::new();
        for row in rows {
            let (ticket, recorded_at, waiter, total) = row.map_err(db)?;
            entries.push(SaleSummary {
                ticket: ticket_from_row(ticket)?,
                recorded_at: timestamp_from_row(&recorded_at)?,
                waiter: WaiterName::new(waiter),
                total: money_from_row(total, "sale total")?,
            });
        }
        SalesReport::from_entries(entries)
            .map_err(|err| SqliteStoreError::Corrupt(format!("report total: {err}")))
    }
}

impl PosStore for SqlitePosStore {
    fn load_credentials(&self, name: &UserName) -> Result<Option<StoredCredentials>, StoreError> {
        self.load_credentials_row(name).map_err(StoreError::from)
    }

    fn insert_user_if_absent(
        &self,
        name: &UserName,
        digest: &PasswordDigest,
        role: Role,
    ) -> Result<bool, StoreError> {
        self.insert_user_row(name, digest, role).map_err(StoreError::from)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        self.list_product_rows().map_err(StoreError::from)
    }

    fn add_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        self.insert_product_row(product).map_err(StoreError::from)
    }

    fn remove_product(&self, id: ProductId) -> Result<bool, StoreError> {
        self.delete_product_row(id).map_err(StoreError::from)
    }

    fn next_ticket(&self) -> Result<TicketNumber, StoreError> {
        self.peek_ticket().map_err(StoreError::from)
    }

    fn register_sale(
        &self,
        draft: &SaleDraft,
        recorded_at: SaleTimestamp,
    ) -> Result<Sale, StoreError> {
        self.insert_sale(draft, recorded_at).map_err(StoreError::from)
    }

    fn update_sale(&self, id: SaleId, draft: &SaleDraft) -> Result<Sale, StoreError> {
        self.rewrite_sale(id, draft).map_err(StoreError::from)
    }

    fn sale_by_ticket(&self, ticket: TicketNumber) -> Result<Option<Sale>, StoreError> {
        self.sale_row(ticket).map_err(StoreError::from)
    }

    fn void_sale(&self, ticket: TicketNumber) -> Result<bool, StoreError> {
        self.delete_sale(ticket).map_err(StoreError::from)
    }

    fn sales_report(&self, filter: ReportFilter) -> Result<SalesReport, StoreError> {
        self.report_rows(filter).map_err(StoreError::from)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(|err| StoreError::Store(err.to_string()))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Row Helpers
// ============================================================================

/// Inserts sale lines in cart order.
fn insert_lines(
    tx: &Transaction<'_>,
    sale_id: SaleId,
    lines: &[SaleLine],
) -> Result<(), SqliteStoreError> {
    let sale_value = to_sql_int(sale_id.get())?;
    let mut statement = tx
        .prepare(
            "INSERT INTO sale_lines (sale_id, position, product, quantity, unit_price_cents, \
             subtotal_cents) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(db)?;
    for (position, line) in lines.iter().enumerate() {
        let position = i64::try_from(position)
            .map_err(|_| SqliteStoreError::Invalid("too many sale lines".to_string()))?;
        statement
            .execute(params![
                sale_value,
                position,
                line.product,
                i64::from(line.quantity),
                line.unit_price.cents(),
                line.subtotal.cents()
            ])
            .map_err(db)?;
    }
    Ok(())
}

/// Column used to look up a sale row.
#[derive(Debug, Clone, Copy)]
enum SaleKey {
    /// Internal row id.
    Id(i64),
    /// Correlative ticket number.
    Ticket(i64),
}

/// Loads one sale with its lines.
fn load_sale(connection: &Connection, key: SaleKey) -> Result<Option<Sale>, SqliteStoreError> {
    let (sql, key) = match key {
        SaleKey::Id(id) => {
            ("SELECT id, ticket, recorded_at, total_cents, waiter FROM sales WHERE id = ?1", id)
        }
        SaleKey::Ticket(ticket) => (
            "SELECT id, ticket, recorded_at, total_cents, waiter FROM sales WHERE ticket = ?1",
            ticket,
        ),
    };
    let header = connection
        .query_row(sql, params![key], |row| {
            let id: i64 = row.get(0)?;
            let ticket: i64 = row.get(1)?;
            let recorded_at: String = row.get(2)?;
            let total: i64 = row.get(3)?;
            let waiter: String = row.get(4)?;
            Ok((id, ticket, recorded_at, total, waiter))
        })
        .optional()
        .map_err(db)?;
    let Some((id, ticket, recorded_at, total, waiter)) = header else {
        return Ok(None);
    };
    let mut statement = connection
        .prepare(
            "SELECT product, quantity, unit_price_cents, subtotal_cents FROM sale_lines WHERE \
             sale_id = ?1 ORDER BY position",
        )
        .map_err(db)?;
    let rows = statement
        .query_map(params![id], |row| {
            let product: String = row.get(0)?;
            let quantity: i64 = row.get(1)?;
            let unit_price: i64 = row.get(2)?;
            let subtotal: i64 = row.get(3)?;
            Ok((product, quantity, unit_price, subtotal))
        })
        .map_err(db)?;
    let mut lines = Vec::new();
    for row in rows {
        let (product, quantity, unit_price, subtotal) = row.map_err(db)?;
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid quantity on sale {id}")))?;
        lines.push(SaleLine {
            product,
            quantity,
            unit_price: money_from_row(unit_price, "line price")?,
            subtotal: money_from_row(subtotal, "line subtotal")?,
        });
    }
    Ok(Some(Sale {
        id: sale_id_from_row(id)?,
        ticket: ticket_from_row(ticket)?,
        recorded_at: timestamp_from_row(&recorded_at)?,
        waiter: WaiterName::new(waiter),
        total: money_from_row(total, "sale total")?,
        lines,
    }))
}

/// Reads the last issued ticket number.
fn read_last_ticket(connection: &Connection) -> Result<i64, SqliteStoreError> {
    let last: i64 = connection
        .query_row("SELECT last_ticket FROM ticket_sequence WHERE id = 1", params![], |row| {
            row.get(0)
        })
        .optional()
        .map_err(db)?
        .ok_or_else(|| SqliteStoreError::Corrupt("missing ticket sequence".to_string()))?;
    if last < 0 {
        return Err(SqliteStoreError::Corrupt(format!("negative ticket sequence: {last}")));
    }
    Ok(last)
}

/// Returns the ticket following `last`.
fn ticket_after(last: i64) -> Result<TicketNumber, SqliteStoreError> {
    last.checked_add(1)
        .and_then(|next| u64::try_from(next).ok())
        .and_then(TicketNumber::from_raw)
        .ok_or_else(|| SqliteStoreError::Invalid("ticket sequence exhausted".to_string()))
}

/// Converts an identifier to an `SQLite` integer.
fn to_sql_int(value: u64) -> Result<i64, SqliteStoreError> {
    i64::try_from(value)
        .map_err(|_| SqliteStoreError::Invalid(format!("identifier out of range: {value}")))
}

/// Converts a row integer to a positive identifier.
fn positive(value: i64, label: &str) -> Result<u64, SqliteStoreError> {
    u64::try_from(value)
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid {label}: {value}")))
}

/// Converts a row integer to a product id.
fn product_id_from_row(value: i64) -> Result<ProductId, SqliteStoreError> {
    let raw = positive(value, "product id")?;
    ProductId::from_raw(raw)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid product id: {value}")))
}

/// Converts a row integer to a sale id.
fn sale_id_from_row(value: i64) -> Result<SaleId, SqliteStoreError> {
    let raw = positive(value, "sale id")?;
    SaleId::from_raw(raw)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid sale id: {value}")))
}

/// Converts a row integer to a ticket number.
fn ticket_from_row(value: i64) -> Result<TicketNumber, SqliteStoreError> {
    let raw = positive(value, "ticket")?;
    TicketNumber::from_raw(raw)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid ticket: {value}")))
}

/// Converts a row integer to a non-negative amount.
fn money_from_row(cents: i64, label: &str) -> Result<Money, SqliteStoreError> {
    if cents < 0 {
        return Err(SqliteStoreError::Corrupt(format!("negative {label}: {cents}")));
    }
    Ok(Money::from_cents(cents))
}

/// Parses a stored sale timestamp.
fn timestamp_from_row(text: &str) -> Result<SaleTimestamp, SqliteStoreError> {
    SaleTimestamp::parse(text)
        .map_err(|err| SqliteStoreError::Corrupt(format!("invalid recorded_at {text:?}: {err}")))
}

// ============================================================================
// SECTION: Connection Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags).map_err(db)?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection.execute_batch("PRAGMA foreign_keys = ON;").map_err(db)?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db)?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(db)?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(db)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(db)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(db)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(db)?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    name TEXT PRIMARY KEY,
                    password_salt TEXT NOT NULL,
                    password_hash TEXT NOT NULL,
                    role TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS products (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE,
                    base_price_cents INTEGER NOT NULL CHECK (base_price_cents >= 0)
                );
                CREATE TABLE IF NOT EXISTS ticket_sequence (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    last_ticket INTEGER NOT NULL
                );
                INSERT INTO ticket_sequence (id, last_ticket) VALUES (1, 0);
                CREATE TABLE IF NOT EXISTS sales (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    ticket INTEGER NOT NULL UNIQUE,
                    recorded_at TEXT NOT NULL,
                    total_cents INTEGER NOT NULL,
                    waiter TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS sale_lines (
                    sale_id INTEGER NOT NULL,
                    position INTEGER NOT NULL,
                    product TEXT NOT NULL,
                    quantity INTEGER NOT NULL CHECK (quantity > 0),
                    unit_price_cents INTEGER NOT NULL,
                    subtotal_cents INTEGER NOT NULL,
                    PRIMARY KEY (sale_id, position),
                    FOREIGN KEY (sale_id) REFERENCES sales(id) ON DELETE CASCADE
                );
                CREATE INDEX IF NOT EXISTS idx_sales_recorded_at ON sales (recorded_at);",
            )
            .map_err(db)?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(db)?;
    Ok(())
}

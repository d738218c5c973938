// crates/countertop-config/src/config.rs
// ============================================================================
// Module: Countertop Configuration
// Description: Configuration loading and validation for Countertop.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: countertop-core, countertop-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults, so an empty file (or no file at the default
//! location) yields a working single-till setup. Explicitly named files that
//! are missing or invalid fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use countertop_core::Money;
use countertop_core::NewProduct;
use countertop_core::ReceiptOptions;
use countertop_core::Role;
use countertop_core::UserName;
use countertop_core::WaiterName;
use countertop_store_sqlite::SeedUser;
use countertop_store_sqlite::SqliteStoreConfig;
use countertop_store_sqlite::SqliteStoreMode;
use countertop_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "countertop.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "COUNTERTOP_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default database filename.
const DEFAULT_STORE_PATH: &str = "countertop.db";
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum busy timeout (ms).
const MAX_BUSY_TIMEOUT_MS: u64 = 60_000;
/// Maximum number of rostered waiters.
const MAX_WAITERS: usize = 64;
/// Maximum length of a waiter, user, or product name.
const MAX_NAME_LENGTH: usize = 64;
/// Maximum length of a receipt label.
const MAX_LABEL_LENGTH: usize = 64;
/// Maximum length of the currency symbol.
const MAX_CURRENCY_SYMBOL_LENGTH: usize = 8;
/// Maximum receipt product column width.
const MAX_NAME_WIDTH: usize = 64;
/// Maximum number of seed users or seed products.
const MAX_SEED_ENTRIES: usize = 1_024;
/// Maximum length of the logging filter directive.
const MAX_FILTER_LENGTH: usize = 512;
/// Default receipt output directory.
const DEFAULT_RECEIPT_DIR: &str = "receipts";
/// Default logging filter.
const DEFAULT_LOG_FILTER: &str = "warn";
/// Default waiter roster.
const DEFAULT_WAITERS: [&str; 4] = ["ELDER", "ANA", "ALEJANDRA", "VARIOS"];
/// Default currency symbol.
const DEFAULT_CURRENCY_SYMBOL: &str = "Q";

// ============================================================================
// SECTION: Root
// ============================================================================

/// Countertop configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountertopConfig {
    /// Database configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Register configuration.
    #[serde(default)]
    pub register: RegisterConfig,
    /// Receipt configuration.
    #[serde(default)]
    pub receipt: ReceiptConfig,
    /// Audit log configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Diagnostic logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// First-run seed data.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No file at the default location; built-in defaults apply.
    Defaults,
}

impl CountertopConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from the argument, then `COUNTERTOP_CONFIG`, then
    /// `./countertop.toml`. The resolved file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_file(&resolved)
    }

    /// Loads configuration, falling back to defaults when no path was given
    /// and no file exists at the default location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing or explicitly named file
    /// fails to load or validate.
    pub fn load_or_default(path: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let explicit = path.is_some() || env::var_os(CONFIG_ENV_VAR).is_some();
        let resolved = resolve_path(path)?;
        if !explicit && !resolved.exists() {
            let mut config = Self::default();
            config.validate()?;
            return Ok((config, ConfigSource::Defaults));
        }
        let config = Self::load_file(&resolved)?;
        Ok((config, ConfigSource::File(resolved)))
    }

    /// Reads, parses, and validates one configuration file.
    fn load_file(resolved: &Path) -> Result<Self, ConfigError> {
        validate_path(resolved)?;
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.register.validate()?;
        self.receipt.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        self.seed.validate()?;
        Ok(())
    }

    /// Returns receipt options combining receipt labels and the currency symbol.
    #[must_use]
    pub fn receipt_options(&self) -> ReceiptOptions {
        ReceiptOptions {
            title: self.receipt.title.clone(),
            reprint_title: self.receipt.reprint_title.clone(),
            footer: self.receipt.footer.clone(),
            attendant_label: self.receipt.attendant_label.clone(),
            product_header: self.receipt.product_header.clone(),
            quantity_header: self.receipt.quantity_header.clone(),
            amount_header: self.receipt.amount_header.clone(),
            name_width: self.receipt.name_width,
            currency_symbol: self.register.currency_symbol.clone(),
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_store_path")]
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

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Validates store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("store.path", &self.path.to_string_lossy())?;
        if self.busy_timeout_ms == 0 || self.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "store.busy_timeout_ms must be between 1 and {MAX_BUSY_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }

    /// Returns the `SQLite` store configuration.
    #[must_use]
    pub fn sqlite_config(&self) -> SqliteStoreConfig {
        SqliteStoreConfig {
            path: self.path.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode,
            sync_mode: self.sync_mode,
        }
    }
}

/// Returns the default database path.
fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Returns the default busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Register
// ============================================================================

/// Register configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterConfig {
    /// Waiters who may be named responsible for a sale.
    #[serde(default = "default_waiters")]
    pub waiters: Vec<String>,
    /// Currency symbol printed before amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            waiters: default_waiters(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl RegisterConfig {
    /// Validates and normalizes the roster.
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.waiters.is_empty() {
            return Err(ConfigError::Invalid("register.waiters must be non-empty".to_string()));
        }
        if self.waiters.len() > MAX_WAITERS {
            return Err(ConfigError::Invalid(format!(
                "register.waiters exceeds {MAX_WAITERS} entries"
            )));
        }
        let mut seen = BTreeSet::new();
        for waiter in &mut self.waiters {
            let trimmed = waiter.trim().to_string();
            validate_name("register.waiters", &trimmed)?;
            if !seen.insert(trimmed.to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "register.waiters contains duplicate entry: {trimmed}"
                )));
            }
            *waiter = trimmed;
        }
        let symbol = self.currency_symbol.trim();
        if symbol.is_empty() || symbol.chars().count() > MAX_CURRENCY_SYMBOL_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "register.currency_symbol must be 1 to {MAX_CURRENCY_SYMBOL_LENGTH} characters"
            )));
        }
        self.currency_symbol = symbol.to_string();
        Ok(())
    }

    /// Returns the roster as waiter names.
    #[must_use]
    pub fn roster(&self) -> Vec<WaiterName> {
        self.waiters.iter().map(|waiter| WaiterName::new(waiter.as_str())).collect()
    }
}

/// Returns the default waiter roster.
fn default_waiters() -> Vec<String> {
    DEFAULT_WAITERS.iter().map(ToString::to_string).collect()
}

/// Returns the default currency symbol.
fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

// ============================================================================
// SECTION: Receipt
// ============================================================================

/// Receipt configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Directory receipts are written to.
    pub output_dir: PathBuf,
    /// Title for first prints.
    pub title: String,
    /// Title for reprints after an edit.
    pub reprint_title: String,
    /// Closing line.
    pub footer: String,
    /// Label before the waiter name.
    pub attendant_label: String,
    /// Product column header.
    pub product_header: String,
    /// Quantity column header.
    pub quantity_header: String,
    /// Amount column header.
    pub amount_header: String,
    /// Maximum product name characters before truncation.
    pub name_width: usize,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        let options = ReceiptOptions::default();
        Self {
            output_dir: PathBuf::from(DEFAULT_RECEIPT_DIR),
            title: options.title,
            reprint_title: options.reprint_title,
            footer: options.footer,
            attendant_label: options.attendant_label,
            product_header: options.product_header,
            quantity_header: options.quantity_header,
            amount_header: options.amount_header,
            name_width: options.name_width,
        }
    }
}

impl ReceiptConfig {
    /// Validates receipt configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("receipt.output_dir", &self.output_dir.to_string_lossy())?;
        for (field, value) in [
            ("receipt.title", &self.title),
            ("receipt.reprint_title", &self.reprint_title),
            ("receipt.footer", &self.footer),
            ("receipt.attendant_label", &self.attendant_label),
            ("receipt.product_header", &self.product_header),
            ("receipt.quantity_header", &self.quantity_header),
            ("receipt.amount_header", &self.amount_header),
        ] {
            validate_label(field, value)?;
        }
        if self.name_width == 0 || self.name_width > MAX_NAME_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "receipt.name_width must be between 1 and {MAX_NAME_WIDTH}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit and Logging
// ============================================================================

/// Audit log configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Whether audit events are emitted.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Append-only JSON-lines file; stderr when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Returns `true` for serde defaults.
const fn default_true() -> bool {
    true
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Tracing env-filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl LoggingConfig {
    /// Validates logging configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let filter = self.filter.trim();
        if filter.is_empty() || filter.len() > MAX_FILTER_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "logging.filter must be 1 to {MAX_FILTER_LENGTH} bytes"
            )));
        }
        Ok(())
    }
}

/// Returns the default logging filter.
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

// ============================================================================
// SECTION: Seed Data
// ============================================================================

/// First-run seed data.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Users inserted when absent.
    #[serde(default = "default_seed_users")]
    pub users: Vec<SeedUserConfig>,
    /// Products inserted when the catalog is empty.
    #[serde(default = "default_seed_products")]
    pub products: Vec<SeedProductConfig>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: default_seed_users(),
            products: default_seed_products(),
        }
    }
}

/// Seed user entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedUserConfig {
    /// Login name.
    pub name: String,
    /// Clear-text password, digested before storage.
    pub password: String,
    /// Assigned role.
    pub role: Role,
}

/// Seed product entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedProductConfig {
    /// Product name.
    pub name: String,
    /// Base price as a TOML number or decimal string.
    pub price: PriceValue,
}

/// Price accepted as an integer, float, or decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Whole currency units.
    Integer(i64),
    /// Fractional amount.
    Float(f64),
    /// Decimal text such as `"12.50"`.
    Text(String),
}

impl PriceValue {
    /// Converts the value to money.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the price is negative or malformed.
    pub fn to_money(&self) -> Result<Money, ConfigError> {
        let text = match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        };
        Money::parse(&text).map_err(|err| ConfigError::Invalid(format!("seed product price: {err}")))
    }
}

impl SeedConfig {
    /// Validates seed entries.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.users.len() > MAX_SEED_ENTRIES || self.products.len() > MAX_SEED_ENTRIES {
            return Err(ConfigError::Invalid(format!(
                "seed sections are limited to {MAX_SEED_ENTRIES} entries"
            )));
        }
        let mut names = BTreeSet::new();
        for user in &self.users {
            let name = user.name.trim();
            validate_name("seed.users.name", name)?;
            if user.password.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "seed.users.password must be non-empty for {name}"
                )));
            }
            if !names.insert(name.to_string()) {
                return Err(ConfigError::Invalid(format!("seed.users contains duplicate: {name}")));
            }
        }
        let mut names = BTreeSet::new();
        for product in &self.products {
            let name = product.name.trim();
            validate_name("seed.products.name", name)?;
            product.price.to_money()?;
            if !names.insert(name.to_string()) {
                return Err(ConfigError::Invalid(format!(
                    "seed.products contains duplicate: {name}"
                )));
            }
        }
        Ok(())
    }

    /// Returns the seed users for the store.
    #[must_use]
    pub fn store_users(&self) -> Vec<SeedUser> {
        self.users
            .iter()
            .map(|user| SeedUser {
                name: UserName::new(user.name.trim()),
                password: user.password.clone(),
                role: user.role,
            })
            .collect()
    }

    /// Returns the seed products for the store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an entry is malformed.
    pub fn store_products(&self) -> Result<Vec<NewProduct>, ConfigError> {
        self.products
            .iter()
            .map(|product| {
                let price = product.price.to_money()?;
                NewProduct::new(&product.name, price).ok_or_else(|| {
                    ConfigError::Invalid("seed.products.name must be non-empty".to_string())
                })
            })
            .collect()
    }
}

/// Returns the default demo users.
fn default_seed_users() -> Vec<SeedUserConfig> {
    vec![
        SeedUserConfig {
            name: "pruebagerente".to_string(),
            password: "gerente123".to_string(),
            role: Role::Manager,
        },
        SeedUserConfig {
            name: "pruebamesero".to_string(),
            password: "mesero123".to_string(),
            role: Role::Waiter,
        },
    ]
}

/// Returns the default demo catalog.
fn default_seed_products() -> Vec<SeedProductConfig> {
    let catalog = [
        ("Cafe", 5),
        ("Pastel Chocolate", 20),
        ("Desayuno Chapin", 45),
        ("Licuado", 15),
        ("Coca Cola", 15),
    ];
    catalog
        .into_iter()
        .map(|(name, price)| SeedProductConfig {
            name: name.to_string(),
            price: PriceValue::Integer(price),
        })
        .collect()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a trimmed name.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{field} exceeds {MAX_NAME_LENGTH} characters: {value}"
        )));
    }
    Ok(())
}

/// Validates a receipt label.
fn validate_label(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.chars().count() > MAX_LABEL_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_LABEL_LENGTH} characters")));
    }
    Ok(())
}

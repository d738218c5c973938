// crates/countertop-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Keep every user-facing string in one place, in English and Spanish.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! The `countertop` binary routes every line it prints through the [`t!`]
//! macro. Templates live in per-locale tables and use `{name}` placeholders.
//!
//! ## Invariants
//! - The locale is chosen once per process.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Parses a locale label, ignoring case and region tags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

/// Supported locales in presentation order.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Es];

/// A placeholder substitution captured by the [`t!`](crate::t) macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Preformatted value.
    pub value: String,
}

impl MessageArg {
    /// Builds an argument from a key and value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale chosen for this process.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English templates.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "countertop {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to serialize output: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'es'."),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config is valid ({source})."),
    ("config.source.defaults", "built-in defaults"),
    ("store.open_failed", "Failed to open the database: {error}"),
    ("store.seed_failed", "Failed to seed the database: {error}"),
    ("audit.open_failed", "Failed to open the audit log at {path}: {error}"),
    ("auth.user_missing", "No user given. Pass --user or set {env}."),
    ("auth.password_missing", "No password given. Pass --password or set {env}."),
    ("auth.failed", "Login failed: {error}"),
    ("login.ok", "Logged in as {user} ({role})."),
    ("catalog.failed", "Catalog operation failed: {error}"),
    ("catalog.empty", "The catalog is empty."),
    ("catalog.entry", "{id}\t{name}\t{price}"),
    ("catalog.search.none", "No product matches {query}."),
    ("catalog.price_invalid", "Invalid price {value}: {error}"),
    ("catalog.name_empty", "The product name must not be empty."),
    ("catalog.id_invalid", "Product ids start at 1."),
    ("catalog.add.ok", "Added product {id}: {name} ({price})."),
    ("catalog.remove.ok", "Removed product {id}."),
    ("ticket.invalid", "Ticket numbers start at 1."),
    ("sale.failed", "Sale failed: {error}"),
    ("sale.lookup_failed", "Failed to load the ticket: {error}"),
    ("sale.item.invalid", "Invalid item {spec}: {error}"),
    ("sale.line.invalid", "Invalid line to remove: {error}"),
    ("sale.next", "Next ticket: #{ticket}"),
    ("sale.register.ok", "Recorded ticket #{ticket} for {waiter}, total {total}."),
    ("sale.edit.ok", "Updated ticket #{ticket} for {waiter}, total {total}."),
    ("sale.header", "Ticket #{ticket}  {time}  {waiter}"),
    ("sale.line", "{index}. {product} x{quantity} @ {price} = {subtotal}"),
    ("sale.total", "Total: {total}"),
    ("sale.void.ok", "Voided ticket #{ticket}."),
    ("receipt.write_failed", "Failed to write the receipt to {path}: {error}"),
    ("receipt.written", "Receipt written to {path}"),
    ("report.failed", "Failed to build the report: {error}"),
    ("report.empty", "No sales recorded."),
    ("report.entry", "#{ticket}\t{time}\t{waiter}\t{total}"),
    ("report.total", "Total sold: {total}"),
];

/// Spanish templates.
const CATALOG_ES: &[(&str, &str)] = &[
    ("main.version", "countertop {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "salida"),
    ("output.write_failed", "No se pudo escribir en {stream}: {error}"),
    ("output.json_failed", "No se pudo serializar la salida: {error}"),
    ("i18n.lang.invalid_env", "Valor no válido para {env}: {value}. Se esperaba 'en' o 'es'."),
    ("config.load_failed", "No se pudo cargar la configuración: {error}"),
    ("config.validate.ok", "La configuración es válida ({source})."),
    ("config.source.defaults", "valores predeterminados"),
    ("store.open_failed", "No se pudo abrir la base de datos: {error}"),
    ("store.seed_failed", "No se pudieron cargar los datos iniciales: {error}"),
    ("audit.open_failed", "No se pudo abrir la bitácora de auditoría en {path}: {error}"),
    ("auth.user_missing", "Falta el usuario. Use --user o defina {env}."),
    ("auth.password_missing", "Falta la contraseña. Use --password o defina {env}."),
    ("auth.failed", "Inicio de sesión fallido: {error}"),
    ("login.ok", "Sesión iniciada como {user} ({role})."),
    ("catalog.failed", "Falló la operación del catálogo: {error}"),
    ("catalog.empty", "El catálogo está vacío."),
    ("catalog.entry", "{id}\t{name}\t{price}"),
    ("catalog.search.none", "Ningún producto coincide con {query}."),
    ("catalog.price_invalid", "Precio no válido {value}: {error}"),
    ("catalog.name_empty", "El nombre del producto no puede estar vacío."),
    ("catalog.id_invalid", "Los códigos de producto empiezan en 1."),
    ("catalog.add.ok", "Producto {id} agregado: {name} ({price})."),
    ("catalog.remove.ok", "Producto {id} eliminado."),
    ("ticket.invalid", "Los números de ticket empiezan en 1."),
    ("sale.failed", "La venta falló: {error}"),
    ("sale.lookup_failed", "No se pudo cargar el ticket: {error}"),
    ("sale.item.invalid", "Artículo no válido {spec}: {error}"),
    ("sale.line.invalid", "Línea a eliminar no válida: {error}"),
    ("sale.next", "Siguiente ticket: #{ticket}"),
    ("sale.register.ok", "Ticket #{ticket} registrado para {waiter}, total {total}."),
    ("sale.edit.ok", "Ticket #{ticket} modificado para {waiter}, total {total}."),
    ("sale.header", "Ticket #{ticket}  {time}  {waiter}"),
    ("sale.line", "{index}. {product} x{quantity} @ {price} = {subtotal}"),
    ("sale.total", "Total: {total}"),
    ("sale.void.ok", "Ticket #{ticket} anulado."),
    ("receipt.write_failed", "No se pudo escribir el ticket en {path}: {error}"),
    ("receipt.written", "Ticket guardado en {path}"),
    ("report.failed", "No se pudo generar el reporte: {error}"),
    ("report.empty", "No hay ventas registradas."),
    ("report.entry", "#{ticket}\t{time}\t{waiter}\t{total}"),
    ("report.total", "Total vendido: {total}"),
];

/// Returns the raw catalog entries for a locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Es => CATALOG_ES,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ES_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let cell = match locale {
        Locale::En => &CATALOG_EN_MAP,
        Locale::Es => &CATALOG_ES_MAP,
    };
    cell.get_or_init(|| catalog_entries_for(locale).iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(current_locale())
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

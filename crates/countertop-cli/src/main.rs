// crates/countertop-cli/src/main.rs
// ============================================================================
// Module: Countertop CLI Entry Point
// Description: Command dispatcher for the Countertop point of sale.
// Purpose: Provide a localized CLI for catalog, sale, receipt, and report tasks.
// Dependencies: clap, countertop-core, countertop-config, countertop-store-sqlite,
//               serde_jcs, time, tracing-subscriber.
// ============================================================================

//! ## Overview
//! Each invocation is one short session against the local database: the
//! config is loaded, the store is opened and seeded, the operator logs in,
//! and a single command runs. All user-facing strings are routed through the
//! i18n catalog. JSON output is canonical.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use countertop_cli::i18n::Locale;
use countertop_cli::i18n::set_locale;
use countertop_cli::input::ItemSpec;
use countertop_cli::input::removal_order;
use countertop_cli::input::resolve_waiter;
use countertop_cli::t;
use countertop_config::AuditConfig;
use countertop_config::ConfigSource;
use countertop_config::CountertopConfig;
use countertop_config::LoggingConfig;
use countertop_config::config_toml_example;
use countertop_core::AuditSink;
use countertop_core::BackOffice;
use countertop_core::Catalog;
use countertop_core::FileAuditSink;
use countertop_core::Money;
use countertop_core::NewProduct;
use countertop_core::NoopAuditSink;
use countertop_core::Product;
use countertop_core::ProductId;
use countertop_core::Register;
use countertop_core::ReportFilter;
use countertop_core::Sale;
use countertop_core::SaleTimestamp;
use countertop_core::SalesReport;
use countertop_core::StderrAuditSink;
use countertop_core::TicketNumber;
use countertop_core::User;
use countertop_core::WaiterName;
use countertop_core::authenticate;
use countertop_core::render_receipt;
use countertop_core::write_receipt;
use countertop_store_sqlite::SqlitePosStore;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "COUNTERTOP_LANG";
/// Environment variable holding the operator name.
const USER_ENV: &str = "COUNTERTOP_USER";
/// Environment variable holding the operator password.
const PASSWORD_ENV: &str = "COUNTERTOP_PASSWORD";
/// Filter used when neither `RUST_LOG` nor the config filter parses.
const FALLBACK_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "countertop", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `COUNTERTOP_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file path (defaults to `COUNTERTOP_CONFIG`, then ./countertop.toml).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Operator credentials.
    #[command(flatten)]
    credentials: CredentialArgs,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Operator credentials, taken from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
struct CredentialArgs {
    /// Operator login name.
    #[arg(long, value_name = "NAME", env = "COUNTERTOP_USER", global = true)]
    user: Option<String>,
    /// Operator password.
    #[arg(
        long,
        value_name = "PASSWORD",
        env = "COUNTERTOP_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    password: Option<String>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities (no login required).
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Commands that run inside a logged-in session.
    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that require an authenticated operator.
#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Verify credentials and print the operator role.
    Login,
    /// Product catalog utilities.
    Catalog {
        /// Selected catalog subcommand.
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Sale registration, editing, and lookup.
    Sale {
        /// Selected sale subcommand.
        #[command(subcommand)]
        command: SaleCommand,
    },
    /// Reprint the receipt of a recorded sale.
    Receipt(TicketArgs),
    /// Sales report (manager only).
    Report(ReportCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the configuration.
    Validate,
    /// Print a complete example configuration.
    Example,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List every product.
    List(FormatArgs),
    /// Resolve an id or name prefix to a product.
    Search(CatalogSearchCommand),
    /// Add a product (manager only).
    Add(CatalogAddCommand),
    /// Remove a product (manager only).
    Remove(CatalogRemoveCommand),
}

/// Sale subcommands.
#[derive(Subcommand, Debug)]
enum SaleCommand {
    /// Show the ticket number the next sale will receive.
    Next,
    /// Record a new sale.
    Register(SaleRegisterCommand),
    /// Show a recorded sale.
    Show(SaleShowCommand),
    /// Edit a recorded sale in place, keeping its ticket number.
    Edit(SaleEditCommand),
    /// Void a recorded sale (manager only).
    Void(TicketArgs),
}

/// Output format selection.
#[derive(Args, Debug, Clone, Copy)]
struct FormatArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `catalog search`.
#[derive(Args, Debug)]
struct CatalogSearchCommand {
    /// Product id or name prefix.
    #[arg(value_name = "QUERY")]
    query: String,
}

/// Arguments for `catalog add`.
#[derive(Args, Debug)]
struct CatalogAddCommand {
    /// Product name.
    #[arg(long, value_name = "NAME")]
    name: String,
    /// Base price, for example `15` or `12.50`.
    #[arg(long, value_name = "PRICE")]
    price: String,
}

/// Arguments for `catalog remove`.
#[derive(Args, Debug)]
struct CatalogRemoveCommand {
    /// Product id.
    #[arg(long, value_name = "ID")]
    id: u64,
}

/// Arguments naming one ticket.
#[derive(Args, Debug)]
struct TicketArgs {
    /// Ticket number.
    #[arg(long, value_name = "N")]
    ticket: u64,
}

/// Arguments for `sale register`.
#[derive(Args, Debug)]
struct SaleRegisterCommand {
    /// Waiter responsible for the sale.
    #[arg(long, value_name = "WAITER")]
    waiter: Option<String>,
    /// Item as `<name-or-id>[:qty][@price]` (repeatable).
    #[arg(long = "item", value_name = "SPEC")]
    items: Vec<String>,
    /// Skip writing and printing the receipt.
    #[arg(long = "no-print", action = ArgAction::SetTrue)]
    no_print: bool,
}

/// Arguments for `sale show`.
#[derive(Args, Debug)]
struct SaleShowCommand {
    /// Ticket number.
    #[arg(long, value_name = "N")]
    ticket: u64,
    /// Output format selection.
    #[command(flatten)]
    format: FormatArgs,
}

/// Arguments for `sale edit`.
#[derive(Args, Debug)]
struct SaleEditCommand {
    /// Ticket number to edit.
    #[arg(long, value_name = "N")]
    ticket: u64,
    /// Replacement waiter (defaults to the recorded one).
    #[arg(long, value_name = "WAITER")]
    waiter: Option<String>,
    /// One-based line to remove, applied before additions (repeatable).
    #[arg(long = "remove", value_name = "LINE")]
    remove: Vec<usize>,
    /// Item as `<name-or-id>[:qty][@price]` (repeatable).
    #[arg(long = "item", value_name = "SPEC")]
    items: Vec<String>,
    /// Skip writing and printing the receipt.
    #[arg(long = "no-print", action = ArgAction::SetTrue)]
    no_print: bool,
}

/// Arguments for `report`.
#[derive(Args, Debug)]
struct ReportCommand {
    /// Only include sales recorded today (local date).
    #[arg(long, action = ArgAction::SetTrue)]
    today: bool,
    /// Output format selection.
    #[command(flatten)]
    format: FormatArgs,
}

/// Output format for listing commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Canonical JSON.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Spanish.
    Es,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Es => Self::Es,
        }
    }
}

/// JSON payload for `catalog list`.
#[derive(Serialize)]
struct CatalogOutput<'a> {
    /// Products ordered by id.
    products: &'a [Product],
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    set_locale(resolve_locale(cli.lang, env_lang.as_deref())?);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_line(&t!("main.version", version = version))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => command_config(&command, cli.config.as_deref()),
        Commands::Session(command) => {
            let session = Session::open(cli.config.as_deref())?;
            let operator = session.login(&cli.credentials)?;
            command_session(&session, &operator, command)
        }
    }
}

/// Dispatches commands that run inside a session.
fn command_session(
    session: &Session,
    operator: &User,
    command: SessionCommand,
) -> CliResult<ExitCode> {
    match command {
        SessionCommand::Login => command_login(operator),
        SessionCommand::Catalog {
            command,
        } => command_catalog(session, operator, command),
        SessionCommand::Sale {
            command,
        } => command_sale(session, operator, command),
        SessionCommand::Receipt(command) => command_receipt(session, operator, &command),
        SessionCommand::Report(command) => command_report(session, operator, &command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_line("")
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Loaded configuration, opened store, and audit sink for one invocation.
struct Session {
    /// Validated configuration.
    config: CountertopConfig,
    /// Durable store.
    store: SqlitePosStore,
    /// Business event sink.
    audit: Box<dyn AuditSink>,
    /// Waiters who may be named on a sale.
    roster: Vec<WaiterName>,
}

impl Session {
    /// Loads config, starts logging, opens and seeds the store.
    fn open(config_path: Option<&Path>) -> CliResult<Self> {
        let (config, _) = load_config(config_path)?;
        init_tracing(&config.logging);
        let store = SqlitePosStore::open(&config.store.sqlite_config())
            .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
        let products = config
            .seed
            .store_products()
            .map_err(|err| CliError::new(t!("store.seed_failed", error = err)))?;
        store
            .seed(&config.seed.store_users(), &products)
            .map_err(|err| CliError::new(t!("store.seed_failed", error = err)))?;
        let audit = build_audit_sink(&config.audit)?;
        let roster = config.register.roster();
        Ok(Self {
            config,
            store,
            audit,
            roster,
        })
    }

    /// Authenticates the operator named by the credentials.
    fn login(&self, credentials: &CredentialArgs) -> CliResult<User> {
        let user = credentials
            .user
            .as_deref()
            .ok_or_else(|| CliError::new(t!("auth.user_missing", env = USER_ENV)))?;
        let password = credentials
            .password
            .as_deref()
            .ok_or_else(|| CliError::new(t!("auth.password_missing", env = PASSWORD_ENV)))?;
        authenticate(&self.store, self.audit.as_ref(), user, password)
            .map_err(|err| CliError::new(t!("auth.failed", error = err)))
    }

    /// Returns role-checked store operations for the operator.
    fn back_office<'a>(&'a self, operator: &'a User) -> BackOffice<'a, SqlitePosStore> {
        BackOffice::new(&self.store, operator, self.audit.as_ref())
    }

    /// Opens a register for the operator.
    fn register<'a>(&'a self, operator: &'a User) -> CliResult<Register<'a, SqlitePosStore>> {
        Register::open(&self.store, operator, &self.roster, self.audit.as_ref())
            .map_err(|err| CliError::new(t!("sale.failed", error = err)))
    }

    /// Returns the configured currency symbol.
    fn symbol(&self) -> &str {
        &self.config.register.currency_symbol
    }
}

/// Loads the configuration, falling back to defaults when none exists.
fn load_config(path: Option<&Path>) -> CliResult<(CountertopConfig, ConfigSource)> {
    CountertopConfig::load_or_default(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Installs the stderr tracing subscriber. `RUST_LOG` wins over the config.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(logging.filter.trim()))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Builds the audit sink selected by the config.
fn build_audit_sink(config: &AuditConfig) -> CliResult<Box<dyn AuditSink>> {
    if !config.enabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(StderrAuditSink)),
    }
}

/// Returns the current local time, or UTC when the offset is unknown.
fn local_now() -> SaleTimestamp {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    SaleTimestamp::new(PrimitiveDateTime::new(now.date(), now.time()))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes config subcommands.
fn command_config(command: &ConfigCommand, path: Option<&Path>) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => {
            let (_, source) = load_config(path)?;
            let label = match source {
                ConfigSource::File(path) => path.display().to_string(),
                ConfigSource::Defaults => t!("config.source.defaults"),
            };
            write_line(&t!("config.validate.ok", source = label))?;
        }
        ConfigCommand::Example => write_text(&config_toml_example())?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Login
// ============================================================================

/// Executes `login`.
fn command_login(operator: &User) -> CliResult<ExitCode> {
    write_line(&t!("login.ok", user = operator.name, role = operator.role))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Catalog Commands
// ============================================================================

/// Dispatches catalog subcommands.
fn command_catalog(
    session: &Session,
    operator: &User,
    command: CatalogCommand,
) -> CliResult<ExitCode> {
    let back_office = session.back_office(operator);
    match command {
        CatalogCommand::List(format) => {
            let catalog = back_office.catalog().map_err(catalog_error)?;
            match format.format {
                OutputFormat::Json => write_json(&CatalogOutput {
                    products: catalog.products(),
                })?,
                OutputFormat::Text => write_text(&render_catalog_text(&catalog, session.symbol()))?,
            }
        }
        CatalogCommand::Search(command) => {
            let catalog = back_office.catalog().map_err(catalog_error)?;
            let product = find_product(&catalog, &command.query)?;
            write_line(&render_product_line(product, session.symbol()))?;
        }
        CatalogCommand::Add(command) => {
            let price = Money::parse(&command.price).map_err(|err| {
                CliError::new(t!("catalog.price_invalid", value = command.price, error = err))
            })?;
            let product = NewProduct::new(&command.name, price)
                .ok_or_else(|| CliError::new(t!("catalog.name_empty")))?;
            let added = back_office.add_product(&product).map_err(catalog_error)?;
            write_line(&t!(
                "catalog.add.ok",
                id = added.id,
                name = added.name,
                price = added.base_price.with_symbol(session.symbol())
            ))?;
        }
        CatalogCommand::Remove(command) => {
            let id = ProductId::from_raw(command.id)
                .ok_or_else(|| CliError::new(t!("catalog.id_invalid")))?;
            back_office.remove_product(id).map_err(catalog_error)?;
            write_line(&t!("catalog.remove.ok", id = id))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolves cashier input to a catalog product.
fn find_product<'a>(catalog: &'a Catalog, query: &str) -> CliResult<&'a Product> {
    catalog
        .smart_search(query)
        .ok_or_else(|| CliError::new(t!("catalog.search.none", query = query.trim())))
}

/// Renders the catalog as one line per product.
fn render_catalog_text(catalog: &Catalog, symbol: &str) -> String {
    if catalog.is_empty() {
        return t!("catalog.empty");
    }
    catalog
        .products()
        .iter()
        .map(|product| render_product_line(product, symbol))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one catalog row.
fn render_product_line(product: &Product, symbol: &str) -> String {
    t!(
        "catalog.entry",
        id = product.id,
        name = product.name,
        price = product.base_price.with_symbol(symbol)
    )
}

/// Formats a catalog failure.
fn catalog_error(error: impl std::fmt::Display) -> CliError {
    CliError::new(t!("catalog.failed", error = error))
}

// ============================================================================
// SECTION: Sale Commands
// ============================================================================

/// Dispatches sale subcommands.
fn command_sale(session: &Session, operator: &User, command: SaleCommand) -> CliResult<ExitCode> {
    match command {
        SaleCommand::Next => {
            let register = session.register(operator)?;
            let ticket = register.next_ticket().map_err(sale_error)?;
            write_line(&t!("sale.next", ticket = ticket))?;
        }
        SaleCommand::Register(command) => command_sale_register(session, operator, &command)?,
        SaleCommand::Show(command) => {
            let ticket = parse_ticket(command.ticket)?;
            let sale = session.back_office(operator).sale(ticket).map_err(lookup_error)?;
            match command.format.format {
                OutputFormat::Json => write_json(&sale)?,
                OutputFormat::Text => write_text(&render_sale_text(&sale, session.symbol()))?,
            }
        }
        SaleCommand::Edit(command) => command_sale_edit(session, operator, &command)?,
        SaleCommand::Void(command) => {
            let ticket = parse_ticket(command.ticket)?;
            session.back_office(operator).void_sale(ticket).map_err(sale_error)?;
            write_line(&t!("sale.void.ok", ticket = ticket))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `sale register`.
fn command_sale_register(
    session: &Session,
    operator: &User,
    command: &SaleRegisterCommand,
) -> CliResult<()> {
    let catalog = session.back_office(operator).catalog().map_err(catalog_error)?;
    let mut register = session.register(operator)?;
    add_items(&mut register, &catalog, &command.items)?;
    let waiter = command.waiter.as_deref().map(|name| resolve_waiter(&session.roster, name));
    let closed = register.finish(waiter.as_ref(), local_now()).map_err(sale_error)?;
    let sale = &closed.sale;
    write_line(&t!(
        "sale.register.ok",
        ticket = sale.ticket,
        waiter = sale.waiter,
        total = sale.total.with_symbol(session.symbol())
    ))?;
    if !command.no_print {
        emit_receipt(session, sale, closed.reprint)?;
    }
    Ok(())
}

/// Executes `sale edit`.
fn command_sale_edit(
    session: &Session,
    operator: &User,
    command: &SaleEditCommand,
) -> CliResult<()> {
    let ticket = parse_ticket(command.ticket)?;
    let catalog = session.back_office(operator).catalog().map_err(catalog_error)?;
    let mut register = session.register(operator)?;
    let stored = register.begin_edit(ticket).map_err(sale_error)?;
    let order = removal_order(&command.remove, stored.lines.len())
        .map_err(|err| CliError::new(t!("sale.line.invalid", error = err)))?;
    for index in order {
        register.remove(index).map_err(sale_error)?;
    }
    add_items(&mut register, &catalog, &command.items)?;
    let waiter = command
        .waiter
        .as_deref()
        .map_or_else(|| stored.waiter.clone(), |name| resolve_waiter(&session.roster, name));
    let closed = register.finish(Some(&waiter), local_now()).map_err(sale_error)?;
    let sale = &closed.sale;
    write_line(&t!(
        "sale.edit.ok",
        ticket = sale.ticket,
        waiter = sale.waiter,
        total = sale.total.with_symbol(session.symbol())
    ))?;
    if !command.no_print {
        emit_receipt(session, sale, closed.reprint)?;
    }
    Ok(())
}

/// Parses item arguments and adds them to the register cart.
fn add_items(
    register: &mut Register<'_, SqlitePosStore>,
    catalog: &Catalog,
    items: &[String],
) -> CliResult<()> {
    for item in items {
        let spec = ItemSpec::parse(item)
            .map_err(|err| CliError::new(t!("sale.item.invalid", spec = item, error = err)))?;
        let product = find_product(catalog, &spec.query)?;
        let unit_price = spec.price.unwrap_or(product.base_price);
        register.add(&product.name, spec.quantity, unit_price).map_err(sale_error)?;
    }
    Ok(())
}

/// Renders a recorded sale with one-based line numbers.
fn render_sale_text(sale: &Sale, symbol: &str) -> String {
    let mut lines = vec![t!(
        "sale.header",
        ticket = sale.ticket,
        time = sale.recorded_at,
        waiter = sale.waiter
    )];
    for (index, line) in sale.lines.iter().enumerate() {
        lines.push(t!(
            "sale.line",
            index = index + 1,
            product = line.product,
            quantity = line.quantity,
            price = line.unit_price.with_symbol(symbol),
            subtotal = line.subtotal.with_symbol(symbol)
        ));
    }
    lines.push(t!("sale.total", total = sale.total.with_symbol(symbol)));
    lines.join("\n")
}

/// Validates a ticket argument.
fn parse_ticket(raw: u64) -> CliResult<TicketNumber> {
    TicketNumber::from_raw(raw).ok_or_else(|| CliError::new(t!("ticket.invalid")))
}

/// Formats a sale workflow failure.
fn sale_error(error: impl std::fmt::Display) -> CliError {
    CliError::new(t!("sale.failed", error = error))
}

/// Formats a ticket lookup failure.
fn lookup_error(error: impl std::fmt::Display) -> CliError {
    CliError::new(t!("sale.lookup_failed", error = error))
}

// ============================================================================
// SECTION: Receipts
// ============================================================================

/// Executes `receipt`.
fn command_receipt(session: &Session, operator: &User, command: &TicketArgs) -> CliResult<ExitCode> {
    let ticket = parse_ticket(command.ticket)?;
    let sale = session.back_office(operator).sale(ticket).map_err(lookup_error)?;
    emit_receipt(session, &sale, false)?;
    Ok(ExitCode::SUCCESS)
}

/// Renders, stores, and prints a receipt.
fn emit_receipt(session: &Session, sale: &Sale, reprint: bool) -> CliResult<()> {
    let text = render_receipt(sale, reprint, &session.config.receipt_options());
    let dir = &session.config.receipt.output_dir;
    let path = write_receipt(dir, sale.ticket, &text).map_err(|err| {
        CliError::new(t!("receipt.write_failed", path = dir.display(), error = err))
    })?;
    tracing::debug!(ticket = %sale.ticket, path = %path.display(), "receipt written");
    write_text(&text)?;
    write_line(&t!("receipt.written", path = path.display()))
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Executes `report`.
fn command_report(session: &Session, operator: &User, command: &ReportCommand) -> CliResult<ExitCode> {
    let filter =
        if command.today { ReportFilter::Day(local_now().date()) } else { ReportFilter::All };
    let report = session
        .back_office(operator)
        .report(filter)
        .map_err(|err| CliError::new(t!("report.failed", error = err)))?;
    match command.format.format {
        OutputFormat::Json => write_json(&report)?,
        OutputFormat::Text => write_text(&render_report_text(&report, session.symbol()))?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders a report as one line per sale plus the total.
fn render_report_text(report: &SalesReport, symbol: &str) -> String {
    let mut lines = Vec::with_capacity(report.entries.len() + 1);
    if report.entries.is_empty() {
        lines.push(t!("report.empty"));
    }
    for entry in &report.entries {
        lines.push(t!(
            "report.entry",
            ticket = entry.ticket,
            time = entry.recorded_at,
            waiter = entry.waiter,
            total = entry.total.with_symbol(symbol)
        ));
    }
    lines.push(t!("report.total", total = report.total_sold.with_symbol(symbol)));
    lines.join("\n")
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stdout, mapping failures to a localized error.
fn write_line(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a text block to stdout, ending it with a newline.
fn write_text(text: &str) -> CliResult<()> {
    let mut output = text.to_string();
    if !output.ends_with('\n') {
        output.push('\n');
    }
    write_stdout_bytes(output.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes canonical JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

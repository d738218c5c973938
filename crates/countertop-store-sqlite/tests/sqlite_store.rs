// crates/countertop-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Store Tests
// Description: Persistence, numbering, edit, void, and seeding behavior.
// ============================================================================
//! ## Overview
//! Exercises the SQLite-backed store end to end against temporary database
//! files, including reopen durability and schema version checks.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

use countertop_core::Money;
use countertop_core::NewProduct;
use countertop_core::NoopAuditSink;
use countertop_core::PosStore;
use countertop_core::ProductId;
use countertop_core::Register;
use countertop_core::ReportFilter;
use countertop_core::Role;
use countertop_core::SaleDraft;
use countertop_core::SaleLine;
use countertop_core::SaleTimestamp;
use countertop_core::StoreError;
use countertop_core::TicketNumber;
use countertop_core::User;
use countertop_core::UserName;
use countertop_core::WaiterName;
use countertop_core::authenticate;
use countertop_store_sqlite::SeedUser;
use countertop_store_sqlite::SqlitePosStore;
use countertop_store_sqlite::SqliteStoreConfig;
use countertop_store_sqlite::SqliteStoreError;
use tempfile::TempDir;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn open(dir: &TempDir) -> SqlitePosStore {
    SqlitePosStore::open(&SqliteStoreConfig::new(dir.path().join("countertop.db"))).unwrap()
}

fn line(product: &str, quantity: u32, unit_cents: i64) -> SaleLine {
    SaleLine {
        product: product.to_string(),
        quantity,
        unit_price: Money::from_cents(unit_cents),
        subtotal: Money::from_cents(unit_cents * i64::from(quantity)),
    }
}

fn draft(waiter: &str, lines: Vec<SaleLine>) -> SaleDraft {
    let total = Money::checked_sum(lines.iter().map(|line| line.subtotal)).unwrap();
    SaleDraft {
        waiter: WaiterName::from(waiter),
        total,
        lines,
    }
}

fn at(text: &str) -> SaleTimestamp {
    SaleTimestamp::parse(text).unwrap()
}

fn ticket(raw: u64) -> TicketNumber {
    TicketNumber::from_raw(raw).unwrap()
}

fn demo_products() -> Vec<NewProduct> {
    [("Cafe", 500), ("Pastel Chocolate", 2_000), ("Desayuno Chapin", 4_500)]
        .into_iter()
        .map(|(name, cents)| NewProduct::new(name, Money::from_cents(cents)).unwrap())
        .collect()
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

#[test]
fn products_are_listed_by_id_and_names_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    for product in demo_products() {
        store.add_product(&product).unwrap();
    }

    let names: Vec<String> =
        store.list_products().unwrap().into_iter().map(|product| product.name).collect();
    assert_eq!(names, vec!["Cafe", "Pastel Chocolate", "Desayuno Chapin"]);

    let duplicate = store.add_product(&NewProduct::new("Cafe", Money::from_cents(1)).unwrap());
    assert!(matches!(duplicate, Err(StoreError::Duplicate(_))));
}

#[test]
fn check_constraint_failures_are_not_reported_as_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let negative = NewProduct::new("Refund", Money::from_cents(-1)).unwrap();

    let result = store.add_product(&negative);
    assert!(matches!(result, Err(StoreError::Store(_))));
    assert!(store.list_products().unwrap().is_empty());
}

#[test]
fn removing_a_product_keeps_recorded_sales_intact() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let cafe = store.add_product(&NewProduct::new("Cafe", Money::from_cents(500)).unwrap()).unwrap();
    let sale = store
        .register_sale(&draft("ANA", vec![line("Cafe", 2, 500)]), at("2026-03-14 08:00:00"))
        .unwrap();

    assert!(store.remove_product(cafe.id).unwrap());
    assert!(!store.remove_product(cafe.id).unwrap());
    let reloaded = store.sale_by_ticket(sale.ticket).unwrap().unwrap();
    assert_eq!(reloaded.lines[0].product, "Cafe");
    assert!(!store.remove_product(ProductId::from_raw(99).unwrap()).unwrap());
}

// ============================================================================
// SECTION: Sales
// ============================================================================

#[test]
fn sales_round_trip_with_lines_in_cart_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    assert_eq!(store.next_ticket().unwrap(), ticket(1));

    let recorded = store
        .register_sale(
            &draft("ELDER", vec![line("Licuado", 1, 1_500), line("Cafe", 3, 500)]),
            at("2026-03-14 08:15:30"),
        )
        .unwrap();
    assert_eq!(recorded.ticket, ticket(1));
    assert_eq!(store.next_ticket().unwrap(), ticket(2));

    let loaded = store.sale_by_ticket(ticket(1)).unwrap().unwrap();
    assert_eq!(loaded, recorded);
    assert_eq!(loaded.total, Money::from_cents(3_000));
    assert!(store.sale_by_ticket(ticket(2)).unwrap().is_none());
}

#[test]
fn update_replaces_lines_and_keeps_ticket_and_time() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let original = store
        .register_sale(
            &draft("ANA", vec![line("Cafe", 1, 500), line("Pastel Chocolate", 1, 2_000)]),
            at("2026-03-14 08:00:00"),
        )
        .unwrap();

    let updated = store
        .update_sale(original.id, &draft("VARIOS", vec![line("Desayuno Chapin", 2, 4_500)]))
        .unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.ticket, original.ticket);
    assert_eq!(updated.recorded_at, original.recorded_at);
    assert_eq!(updated.waiter, WaiterName::from("VARIOS"));
    assert_eq!(updated.lines, vec![line("Desayuno Chapin", 2, 4_500)]);
    assert_eq!(store.sale_by_ticket(original.ticket).unwrap().unwrap(), updated);
    assert_eq!(store.next_ticket().unwrap(), ticket(2));
}

#[test]
fn update_of_missing_sale_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let sale = store
        .register_sale(&draft("ANA", vec![line("Cafe", 1, 500)]), at("2026-03-14 08:00:00"))
        .unwrap();
    store.void_sale(sale.ticket).unwrap();

    let result = store.update_sale(sale.id, &draft("ANA", vec![line("Cafe", 1, 500)]));
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn voided_ticket_numbers_are_not_reissued_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = open(&dir);
        store
            .register_sale(&draft("ANA", vec![line("Cafe", 1, 500)]), at("2026-03-14 08:00:00"))
            .unwrap();
        store
            .register_sale(&draft("ANA", vec![line("Cafe", 1, 500)]), at("2026-03-14 08:01:00"))
            .unwrap();
        assert!(store.void_sale(ticket(2)).unwrap());
        assert!(!store.void_sale(ticket(2)).unwrap());
    }

    let store = open(&dir);
    assert_eq!(store.next_ticket().unwrap(), ticket(3));
    let next = store
        .register_sale(&draft("ELDER", vec![line("Cafe", 1, 500)]), at("2026-03-14 09:00:00"))
        .unwrap();
    assert_eq!(next.ticket, ticket(3));
    assert!(store.sale_by_ticket(ticket(1)).unwrap().is_some());
}

#[test]
fn report_filters_by_local_day() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    for (stamp, cents) in
        [("2026-03-13 23:59:59", 500), ("2026-03-14 00:00:00", 1_500), ("2026-03-14 18:30:00", 2_000)]
    {
        store.register_sale(&draft("ANA", vec![line("Cafe", 1, cents)]), at(stamp)).unwrap();
    }

    let all = store.sales_report(ReportFilter::All).unwrap();
    let tickets: Vec<u64> = all.entries.iter().map(|entry| entry.ticket.get()).collect();
    assert_eq!(tickets, vec![3, 2, 1]);
    assert_eq!(all.total_sold, Money::from_cents(4_000));

    let day = store.sales_report(ReportFilter::Day(at("2026-03-14 12:00:00").date())).unwrap();
    let tickets: Vec<u64> = day.entries.iter().map(|entry| entry.ticket.get()).collect();
    assert_eq!(tickets, vec![3, 2]);
    assert_eq!(day.total_sold, Money::from_cents(3_500));
}

#[test]
fn register_workflow_runs_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let operator = User {
        name: UserName::new("mesero"),
        role: Role::Waiter,
    };
    let roster = vec![WaiterName::from("ANA")];
    let audit = NoopAuditSink;
    let mut register = Register::open(&store, &operator, &roster, &audit).unwrap();
    register.add("Cafe", 1, Money::from_cents(500)).unwrap();
    register.add("Cafe", 1, Money::from_cents(500)).unwrap();
    let closed = register.finish(Some(&WaiterName::from("ANA")), at("2026-03-14 10:00:00")).unwrap();

    register.begin_edit(closed.sale.ticket).unwrap();
    register.add("Licuado", 1, Money::from_cents(1_500)).unwrap();
    let edited = register.finish(Some(&WaiterName::from("ANA")), at("2026-03-14 11:00:00")).unwrap();

    let stored = store.sale_by_ticket(closed.sale.ticket).unwrap().unwrap();
    assert_eq!(stored, edited.sale);
    assert_eq!(stored.lines.len(), 2);
    assert_eq!(stored.total, Money::from_cents(2_500));
    assert_eq!(stored.recorded_at, at("2026-03-14 10:00:00"));
}

// ============================================================================
// SECTION: Users and Seeding
// ============================================================================

#[test]
fn seed_inserts_users_once_and_products_only_into_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let users = vec![
        SeedUser {
            name: UserName::new("pruebagerente"),
            password: "gerente123".to_string(),
            role: Role::Manager,
        },
        SeedUser {
            name: UserName::new("pruebamesero"),
            password: "mesero123".to_string(),
            role: Role::Waiter,
        },
    ];

    let first = store.seed(&users, &demo_products()).unwrap();
    assert_eq!(first.users_inserted, 2);
    assert_eq!(first.products_inserted, 3);

    let second = store.seed(&users, &demo_products()).unwrap();
    assert_eq!(second.users_inserted, 0);
    assert_eq!(second.products_inserted, 0);
    assert_eq!(store.list_products().unwrap().len(), 3);

    let audit = NoopAuditSink;
    let manager = authenticate(&store, &audit, "pruebagerente", "gerente123").unwrap();
    assert_eq!(manager.role, Role::Manager);
    assert!(authenticate(&store, &audit, "pruebamesero", "gerente123").is_err());
}

#[test]
fn passwords_are_not_stored_in_clear_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countertop.db");
    let store = SqlitePosStore::open(&SqliteStoreConfig::new(&path)).unwrap();
    store
        .seed(
            &[SeedUser {
                name: UserName::new("pruebamesero"),
                password: "mesero123".to_string(),
                role: Role::Waiter,
            }],
            &[],
        )
        .unwrap();
    drop(store);

    let connection = rusqlite::Connection::open(&path).unwrap();
    let hash: String = connection
        .query_row("SELECT password_hash FROM users WHERE name = 'pruebamesero'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_ne!(hash, "mesero123");
    assert_eq!(hash.len(), 64);
}

// ============================================================================
// SECTION: Schema and Paths
// ============================================================================

#[test]
fn open_rejects_unknown_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countertop.db");
    {
        let connection = rusqlite::Connection::open(&path).unwrap();
        connection
            .execute_batch(
                "CREATE TABLE store_meta (version INTEGER NOT NULL);
                 INSERT INTO store_meta (version) VALUES (99);",
            )
            .unwrap();
    }

    let result = SqlitePosStore::open(&SqliteStoreConfig::new(&path));
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch(_))));
}

#[test]
fn open_rejects_directory_and_overlong_paths() {
    let dir = tempfile::tempdir().unwrap();
    let as_dir = SqlitePosStore::open(&SqliteStoreConfig::new(dir.path()));
    assert!(matches!(as_dir, Err(SqliteStoreError::Invalid(_))));

    let overlong = dir.path().join("a".repeat(300));
    let result = SqlitePosStore::open(&SqliteStoreConfig::new(overlong));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));

    let empty = SqlitePosStore::open(&SqliteStoreConfig::new(""));
    assert!(matches!(empty, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn readiness_succeeds_on_open_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    store.readiness().unwrap();
}

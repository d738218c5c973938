// crates/countertop-core/tests/cart_and_catalog.rs
// ============================================================================
// Module: Cart and Catalog Tests
// Description: Cart merge rules, catalog lookup, and money parsing.
// ============================================================================
//! ## Overview
//! Validates merge-by-price cart semantics, cashier product search, and exact
//! decimal money parsing.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

use countertop_core::Cart;
use countertop_core::CartError;
use countertop_core::Catalog;
use countertop_core::Money;
use countertop_core::MoneyError;
use countertop_core::NewProduct;
use countertop_core::Product;
use countertop_core::ProductId;
use countertop_core::SaleSummary;
use countertop_core::SaleTimestamp;
use countertop_core::SalesReport;
use countertop_core::TicketNumber;
use countertop_core::WaiterName;

fn product(id: u64, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::from_raw(id).unwrap(),
        name: name.to_string(),
        base_price: Money::parse(price).unwrap(),
    }
}

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product(3, "Desayuno Chapin", "45"),
        product(1, "Cafe", "5"),
        product(2, "Pastel Chocolate", "20"),
        product(5, "Coca Cola", "15"),
        product(4, "Licuado", "15"),
    ])
}

// ============================================================================
// SECTION: Cart
// ============================================================================

#[test]
fn cart_merges_same_product_at_same_price() {
    let mut cart = Cart::new();
    cart.add("Cafe", 2, Money::from_cents(500)).unwrap();
    cart.add("Cafe", 3, Money::from_cents(500)).unwrap();

    assert_eq!(cart.len(), 1);
    let line = &cart.lines()[0];
    assert_eq!(line.quantity, 5);
    assert_eq!(line.subtotal, Money::from_cents(2_500));
}

#[test]
fn cart_keeps_separate_lines_for_different_prices() {
    let mut cart = Cart::new();
    cart.add("Cafe", 1, Money::from_cents(500)).unwrap();
    cart.add("Cafe", 1, Money::from_cents(400)).unwrap();
    cart.add("Cafe", 1, Money::from_cents(500)).unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[1].quantity, 1);
    assert_eq!(cart.total().unwrap(), Money::from_cents(1_400));
}

#[test]
fn cart_does_not_merge_different_products_at_same_price() {
    let mut cart = Cart::new();
    cart.add("Licuado", 1, Money::from_cents(1_500)).unwrap();
    cart.add("Coca Cola", 1, Money::from_cents(1_500)).unwrap();
    assert_eq!(cart.len(), 2);
}

#[test]
fn cart_rejects_zero_quantity() {
    let mut cart = Cart::new();
    assert_eq!(cart.add("Cafe", 0, Money::from_cents(500)), Err(CartError::ZeroQuantity));
    assert!(cart.is_empty());
}

#[test]
fn cart_remove_reports_out_of_range_index() {
    let mut cart = Cart::new();
    cart.add("Cafe", 1, Money::from_cents(500)).unwrap();

    assert_eq!(
        cart.remove(1),
        Err(CartError::LineOutOfRange {
            index: 1,
            len: 1,
        })
    );
    let removed = cart.remove(0).unwrap();
    assert_eq!(removed.product, "Cafe");
    assert!(cart.is_empty());
    assert_eq!(cart.total().unwrap(), Money::ZERO);
}

#[test]
fn cart_reports_overflow_instead_of_wrapping() {
    let mut cart = Cart::new();
    let result = cart.add("Vault", u32::MAX, Money::from_cents(i64::MAX / 2));
    assert_eq!(result, Err(CartError::Money(MoneyError::Overflow)));
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

#[test]
fn catalog_orders_products_by_id() {
    let catalog = sample_catalog();
    let ids: Vec<u64> = catalog.products().iter().map(|product| product.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn smart_search_matches_digits_by_id() {
    let catalog = sample_catalog();
    assert_eq!(catalog.smart_search("3").unwrap().name, "Desayuno Chapin");
    assert_eq!(catalog.smart_search(" 5 ").unwrap().name, "Coca Cola");
    assert!(catalog.smart_search("9").is_none());
    assert!(catalog.smart_search("0").is_none());
}

#[test]
fn smart_search_matches_name_prefix_ignoring_case() {
    let catalog = sample_catalog();
    assert_eq!(catalog.smart_search("pas").unwrap().name, "Pastel Chocolate");
    assert_eq!(catalog.smart_search("COCA").unwrap().name, "Coca Cola");
    assert!(catalog.smart_search("chocolate").is_none());
}

#[test]
fn smart_search_returns_first_prefix_match_in_id_order() {
    let catalog = sample_catalog();
    // "Cafe" (id 1) and "Coca Cola" (id 5) both start with "c".
    assert_eq!(catalog.smart_search("c").unwrap().id.get(), 1);
}

#[test]
fn find_by_name_requires_exact_name() {
    let catalog = sample_catalog();
    assert_eq!(catalog.find_by_name("Cafe").unwrap().id.get(), 1);
    assert_eq!(catalog.find_by_name("Coca Cola").unwrap().id.get(), 5);
    assert!(catalog.find_by_name("caf").is_none());
    assert!(catalog.find_by_name("cafe").is_none());
    assert!(catalog.find_by_name("Coca").is_none());
}

#[test]
fn smart_search_ignores_blank_input() {
    assert!(sample_catalog().smart_search("   ").is_none());
}

#[test]
fn new_product_trims_and_rejects_blank_names() {
    let created = NewProduct::new("  Te Frio ", Money::from_cents(1_000)).unwrap();
    assert_eq!(created.name, "Te Frio");
    assert!(NewProduct::new("   ", Money::from_cents(1_000)).is_none());
}

// ============================================================================
// SECTION: Money
// ============================================================================

#[test]
fn money_parses_and_rounds_to_cents() {
    assert_eq!(Money::parse("15").unwrap(), Money::from_cents(1_500));
    assert_eq!(Money::parse("12.5").unwrap(), Money::from_cents(1_250));
    assert_eq!(Money::parse(" 0.10 ").unwrap(), Money::from_cents(10));
    assert_eq!(Money::parse("1.999").unwrap(), Money::from_cents(200));
}

#[test]
fn money_rejects_negative_and_malformed_input() {
    assert!(matches!(Money::parse("-1"), Err(MoneyError::Negative(_))));
    assert!(matches!(Money::parse("-0.001"), Err(MoneyError::Negative(_))));
    assert!(matches!(Money::parse("-0.004"), Err(MoneyError::Negative(_))));
    assert!(matches!(Money::parse("-0"), Err(MoneyError::Negative(_))));
    assert!(matches!(Money::parse(" -5.00"), Err(MoneyError::Negative(_))));
    assert!(matches!(Money::parse("abc"), Err(MoneyError::Invalid(_))));
    assert!(matches!(Money::parse(""), Err(MoneyError::Invalid(_))));
    assert_eq!(Money::parse("1e30"), Err(MoneyError::Overflow));
}

#[test]
fn money_displays_with_currency_symbol() {
    let amount = Money::from_cents(4_505);
    assert_eq!(amount.to_string(), "45.05");
    assert_eq!(amount.with_symbol("Q").to_string(), "Q45.05");
    assert_eq!(Money::from_cents(7).to_string(), "0.07");
}

#[test]
fn money_checked_sum_reports_overflow() {
    let amounts = [Money::from_cents(250), Money::from_cents(1_250)];
    assert_eq!(Money::checked_sum(amounts), Ok(Money::from_cents(1_500)));
    assert_eq!(Money::checked_sum(Vec::new()), Ok(Money::ZERO));
    let huge = [Money::from_cents(i64::MAX), Money::from_cents(i64::MAX)];
    assert_eq!(Money::checked_sum(huge), Err(MoneyError::Overflow));
}

// ============================================================================
// SECTION: Reports
// ============================================================================

fn summary(ticket: u64, cents: i64) -> SaleSummary {
    SaleSummary {
        ticket: TicketNumber::from_raw(ticket).unwrap(),
        recorded_at: SaleTimestamp::parse("2026-03-14 09:05:00").unwrap(),
        waiter: WaiterName::new("ANA"),
        total: Money::from_cents(cents),
    }
}

#[test]
fn report_orders_by_ticket_descending_and_totals_exactly() {
    let report =
        SalesReport::from_entries(vec![summary(1, 500), summary(3, 2_000), summary(2, 1_250)])
            .unwrap();
    let tickets: Vec<u64> = report.entries.iter().map(|entry| entry.ticket.get()).collect();
    assert_eq!(tickets, vec![3, 2, 1]);
    assert_eq!(report.total_sold, Money::from_cents(3_750));
}

#[test]
fn report_total_overflow_is_an_error() {
    let result = SalesReport::from_entries(vec![summary(1, i64::MAX), summary(2, i64::MAX)]);
    assert_eq!(result, Err(MoneyError::Overflow));
}

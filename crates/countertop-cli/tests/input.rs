// crates/countertop-cli/tests/input.rs
// ============================================================================
// Module: CLI Input Tests
// Description: Item specification, waiter, and line index parsing.
// Purpose: Ensure untrusted arguments are parsed strictly.
// ============================================================================

//! ## Overview
//! Covers the `<name-or-id>[:qty][@price]` item grammar, roster lookup for
//! typed waiter names, and the removal order for one-based line indexes.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

use countertop_cli::input::InputError;
use countertop_cli::input::ItemSpec;
use countertop_cli::input::removal_order;
use countertop_cli::input::resolve_waiter;
use countertop_core::Money;
use countertop_core::MoneyError;
use countertop_core::WaiterName;

#[test]
fn bare_item_defaults_to_one_unit_at_catalog_price() {
    let spec = ItemSpec::parse("  Cafe ").unwrap();
    assert_eq!(spec.query, "Cafe");
    assert_eq!(spec.quantity, 1);
    assert_eq!(spec.price, None);
}

#[test]
fn item_accepts_quantity_and_price() {
    let spec: ItemSpec = "Coca Cola:3@12.50".parse().unwrap();
    assert_eq!(spec.query, "Coca Cola");
    assert_eq!(spec.quantity, 3);
    assert_eq!(spec.price, Some(Money::from_cents(1_250)));

    let by_id = ItemSpec::parse("4@10").unwrap();
    assert_eq!(by_id.query, "4");
    assert_eq!(by_id.quantity, 1);
    assert_eq!(by_id.price, Some(Money::from_cents(1_000)));
}

#[test]
fn item_rejects_bad_parts() {
    assert_eq!(ItemSpec::parse(":2"), Err(InputError::EmptyItem));
    assert_eq!(ItemSpec::parse("Cafe:0"), Err(InputError::Quantity("0".to_string())));
    assert_eq!(ItemSpec::parse("Cafe:two"), Err(InputError::Quantity("two".to_string())));
    assert!(matches!(
        ItemSpec::parse("Cafe@-1"),
        Err(InputError::Price(MoneyError::Negative(_)))
    ));
    assert!(matches!(ItemSpec::parse("Cafe@abc"), Err(InputError::Price(MoneyError::Invalid(_)))));
}

#[test]
fn waiter_resolves_to_roster_spelling() {
    let roster = [WaiterName::new("ANA"), WaiterName::new("ALEJANDRA")];
    assert_eq!(resolve_waiter(&roster, " ana "), WaiterName::new("ANA"));
    assert_eq!(resolve_waiter(&roster, "Pedro"), WaiterName::new("Pedro"));
}

#[test]
fn removal_order_is_descending_and_zero_based() {
    assert_eq!(removal_order(&[1, 3, 3, 2], 3).unwrap(), vec![2, 1, 0]);
    assert_eq!(removal_order(&[], 2).unwrap(), Vec::<usize>::new());
    assert_eq!(
        removal_order(&[0], 2),
        Err(InputError::LineOutOfRange {
            index: 0,
            count: 2
        })
    );
    assert_eq!(
        removal_order(&[3], 2),
        Err(InputError::LineOutOfRange {
            index: 3,
            count: 2
        })
    );
}

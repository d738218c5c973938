// crates/countertop-core/tests/cart_proptest.rs
// ============================================================================
// Module: Cart Property Tests
// Description: Property-based checks for cart merge and total invariants.
// ============================================================================
//! ## Overview
//! Any sequence of additions keeps one line per (product, price) pair and a
//! total equal to the sum of every quantity times its price.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

use std::collections::BTreeMap;

use countertop_core::Cart;
use countertop_core::Money;
use proptest::prelude::*;

/// Strategy for one cart addition drawn from a small product/price space.
fn addition() -> impl Strategy<Value = (String, u32, i64)> {
    (
        prop::sample::select(vec!["Cafe", "Licuado", "Coca Cola"]),
        1_u32 .. 20,
        prop::sample::select(vec![500_i64, 1_500, 2_000]),
    )
        .prop_map(|(name, quantity, price)| (name.to_string(), quantity, price))
}

proptest! {
    #[test]
    fn cart_lines_are_unique_and_totals_are_exact(additions in prop::collection::vec(addition(), 0 .. 40)) {
        let mut cart = Cart::new();
        let mut expected: BTreeMap<(String, i64), u32> = BTreeMap::new();
        for (name, quantity, price) in &additions {
            cart.add(name, *quantity, Money::from_cents(*price)).unwrap();
            *expected.entry((name.clone(), *price)).or_default() += quantity;
        }

        prop_assert_eq!(cart.len(), expected.len());
        for line in cart.lines() {
            let key = (line.product.clone(), line.unit_price.cents());
            prop_assert_eq!(Some(&line.quantity), expected.get(&key));
            prop_assert_eq!(line.subtotal.cents(), line.unit_price.cents() * i64::from(line.quantity));
        }
        let expected_total: i64 =
            expected.iter().map(|((_, price), quantity)| price * i64::from(*quantity)).sum();
        prop_assert_eq!(cart.total().unwrap().cents(), expected_total);
    }
}

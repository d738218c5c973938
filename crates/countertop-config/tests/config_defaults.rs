// crates/countertop-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Validation Tests
// Description: Validate default behavior and section invariants.
// Purpose: Ensure an empty config is usable and bad values fail closed.
// =============================================================================
//! ## Overview
//! Config defaults and cross-field validation tests for countertop-config.

use countertop_config::PriceValue;
use countertop_config::config_toml_example;
use countertop_core::Money;
use countertop_core::Role;
use countertop_store_sqlite::SqliteStoreMode;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn default_config_validates() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.register.waiters != ["ELDER", "ANA", "ALEJANDRA", "VARIOS"] {
        return Err(format!("unexpected default roster {:?}", config.register.waiters));
    }
    if config.receipt.name_width != 10 {
        return Err("receipt.name_width should default to 10".to_string());
    }
    if config.store.journal_mode != SqliteStoreMode::Wal {
        return Err("store.journal_mode should default to wal".to_string());
    }
    if config.logging.filter != "warn" {
        return Err("logging.filter should default to warn".to_string());
    }
    Ok(())
}

#[test]
fn default_seed_data_matches_demo_setup() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    let users = config.seed.store_users();
    let roles: Vec<(&str, Role)> = users.iter().map(|user| (user.name.as_str(), user.role)).collect();
    if roles != [("pruebagerente", Role::Manager), ("pruebamesero", Role::Waiter)] {
        return Err(format!("unexpected seed users {roles:?}"));
    }
    let products = config.seed.store_products().map_err(|err| err.to_string())?;
    if products.len() != 5 || products[2].base_price != Money::from_cents(4_500) {
        return Err(format!("unexpected seed products {products:?}"));
    }
    Ok(())
}

#[test]
fn example_config_parses_and_validates() -> TestResult {
    let mut config =
        common::config_from_toml(&config_toml_example()).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    let options = config.receipt_options();
    if options.reprint_title != "TICKET MODIFICADO" || options.currency_symbol != "Q" {
        return Err(format!("unexpected receipt options {options:?}"));
    }
    let prices: Vec<i64> = config
        .seed
        .store_products()
        .map_err(|err| err.to_string())?
        .iter()
        .map(|product| product.base_price.cents())
        .collect();
    if prices != [500, 2_000, 4_500, 1_500, 1_500] {
        return Err(format!("unexpected seed prices {prices:?}"));
    }
    Ok(())
}

#[test]
fn roster_entries_are_trimmed() -> TestResult {
    let mut config = common::config_from_toml("[register]\nwaiters = [\"  ANA \", \"ELDER\"]\n")
        .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    let roster: Vec<String> =
        config.register.roster().iter().map(|waiter| waiter.as_str().to_string()).collect();
    if roster != ["ANA", "ELDER"] {
        return Err(format!("roster was not trimmed: {roster:?}"));
    }
    Ok(())
}

#[test]
fn empty_roster_is_rejected() -> TestResult {
    let mut config =
        common::config_from_toml("[register]\nwaiters = []\n").map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "register.waiters must be non-empty")
}

#[test]
fn duplicate_waiters_are_rejected_ignoring_case() -> TestResult {
    let mut config = common::config_from_toml("[register]\nwaiters = [\"Ana\", \"ANA\"]\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "duplicate entry")
}

#[test]
fn blank_waiter_is_rejected() -> TestResult {
    let mut config = common::config_from_toml("[register]\nwaiters = [\"ANA\", \"  \"]\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "register.waiters must be non-empty")
}

#[test]
fn name_width_must_be_in_range() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.receipt.name_width = 0;
    assert_invalid(config.validate(), "receipt.name_width")?;
    config.receipt.name_width = 65;
    assert_invalid(config.validate(), "receipt.name_width")
}

#[test]
fn blank_receipt_labels_are_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.receipt.footer = "   ".to_string();
    assert_invalid(config.validate(), "receipt.footer must be non-empty")
}

#[test]
fn busy_timeout_must_be_bounded() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.store.busy_timeout_ms = 0;
    assert_invalid(config.validate(), "store.busy_timeout_ms")?;
    config.store.busy_timeout_ms = 600_000;
    assert_invalid(config.validate(), "store.busy_timeout_ms")
}

#[test]
fn negative_seed_price_is_rejected() -> TestResult {
    let mut config = common::config_from_toml(
        "[[seed.products]]\nname = \"Cafe\"\nprice = -5\n",
    )
    .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "seed product price")
}

#[test]
fn duplicate_seed_users_are_rejected() -> TestResult {
    let mut config = common::config_from_toml(
        "[[seed.users]]\nname = \"a\"\npassword = \"x\"\nrole = \"waiter\"\n\n[[seed.users]]\nname = \
         \"a\"\npassword = \"y\"\nrole = \"manager\"\n",
    )
    .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "seed.users contains duplicate")
}

#[test]
fn unknown_role_fails_to_parse() -> TestResult {
    let parsed = common::config_from_toml(
        "[[seed.users]]\nname = \"a\"\npassword = \"x\"\nrole = \"owner\"\n",
    );
    if parsed.is_ok() {
        return Err("role = \"owner\" should not parse".to_string());
    }
    Ok(())
}

#[test]
fn price_values_accept_numbers_and_text() -> TestResult {
    let cases = [
        (PriceValue::Integer(15), 1_500),
        (PriceValue::Float(12.5), 1_250),
        (PriceValue::Text("0.75".to_string()), 75),
    ];
    for (value, cents) in cases {
        let money = value.to_money().map_err(|err| err.to_string())?;
        if money != Money::from_cents(cents) {
            return Err(format!("{value:?} parsed to {money}"));
        }
    }
    Ok(())
}

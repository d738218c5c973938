// crates/countertop-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and `config example` output.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `countertop.toml`. It exercises every section and is
//! kept valid by the config test suite.

/// Returns a canonical example `countertop.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[store]
path = "countertop.db"
journal_mode = "wal"
sync_mode = "full"
busy_timeout_ms = 5000

[register]
waiters = ["ELDER", "ANA", "ALEJANDRA", "VARIOS"]
currency_symbol = "Q"

[receipt]
output_dir = "receipts"
title = "DOLCE VITA"
reprint_title = "TICKET MODIFICADO"
footer = "GRACIAS POR SU VISITA!"
attendant_label = "Atiende"
product_header = "PROD"
quantity_header = "C."
amount_header = "TOT"
name_width = 10

[audit]
enabled = true
# path = "countertop-audit.jsonl"

[logging]
filter = "warn"

[[seed.users]]
name = "pruebagerente"
password = "gerente123"
role = "manager"

[[seed.users]]
name = "pruebamesero"
password = "mesero123"
role = "waiter"

[[seed.products]]
name = "Cafe"
price = 5

[[seed.products]]
name = "Pastel Chocolate"
price = "20.00"

[[seed.products]]
name = "Desayuno Chapin"
price = 45

[[seed.products]]
name = "Licuado"
price = 15.0

[[seed.products]]
name = "Coca Cola"
price = 15
"#,
    )
}

// crates/countertop-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Catalog parity and locale parsing checks.
// Purpose: Keep the English and Spanish catalogs interchangeable.
// ============================================================================

//! ## Overview
//! Every key must exist in both locales with the same placeholders, and
//! locale labels parse leniently.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate;

/// Collects `{name}` placeholders, rejecting unbalanced braces.
fn placeholders(template: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1 ..];
        let end = after.find('}').ok_or_else(|| format!("unclosed brace in {template:?}"))?;
        let name = &after[.. end];
        if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_') {
            return Err(format!("bad placeholder {name:?} in {template:?}"));
        }
        if rest[.. start].contains('}') {
            return Err(format!("unmatched brace in {template:?}"));
        }
        names.insert(name.to_string());
        rest = &after[end + 1 ..];
    }
    if rest.contains('}') {
        return Err(format!("unmatched brace in {template:?}"));
    }
    Ok(names)
}

#[test]
fn catalogs_have_matching_keys() {
    let english: BTreeSet<&str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let keys: BTreeSet<&str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(english, keys, "catalog keys differ for {locale:?}");
    }
}

#[test]
fn catalogs_have_no_duplicate_keys() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len(), "duplicate keys in {locale:?}");
    }
}

#[test]
fn catalogs_share_placeholders_with_english() {
    let english = catalog_for(Locale::En);
    for (key, template) in catalog_entries_for(Locale::Es) {
        let expected = placeholders(english.get(key).copied().expect("english key"))
            .unwrap_or_else(|error| panic!("{key}: {error}"));
        let actual = placeholders(template).unwrap_or_else(|error| panic!("{key}: {error}"));
        assert_eq!(expected, actual, "placeholder mismatch for {key}");
    }
}

#[test]
fn spanish_differs_for_user_facing_messages() {
    for key in ["config.validate.ok", "sale.register.ok", "report.empty", "auth.failed"] {
        assert_ne!(catalog_for(Locale::En).get(key), catalog_for(Locale::Es).get(key), "{key}");
    }
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("es"), Some(Locale::Es));
    assert_eq!(Locale::parse("ES"), Some(Locale::Es));
    assert_eq!(Locale::parse("es-GT"), Some(Locale::Es));
    assert_eq!(Locale::parse("en_US"), Some(Locale::En));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("ca"), None);
}

#[test]
fn translate_substitutes_and_falls_back() {
    let rendered = translate(
        "sale.register.ok",
        vec![
            MessageArg::new("ticket", "7"),
            MessageArg::new("waiter", "ANA"),
            MessageArg::new("total", "Q15.00"),
        ],
    );
    assert_eq!(rendered, "Recorded ticket #7 for ANA, total Q15.00.");
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

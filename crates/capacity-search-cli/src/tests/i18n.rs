// crates/capacity-search-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Ensure CLI localization remains consistent across supported locales.
// Dependencies: capacity-search-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the CLI message catalogs stay in sync, locale parsing is tolerant,
//! and locale templates preserve placeholder parity with English.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate_for;

/// Extracts placeholder names from a template, rejecting malformed braces.
fn parse_placeholder_names(template: &str) -> Result<BTreeSet<String>, String> {
    let mut placeholders = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        if rest[start ..].starts_with('}') {
            return Err(format!("unmatched '}}' in '{template}'"));
        }
        let after = &rest[start + 1 ..];
        let Some(end) = after.find('}') else {
            return Err(format!("unclosed '{{' in '{template}'"));
        };
        let name = &after[.. end];
        if name.is_empty() || name.contains('{') {
            return Err(format!("malformed placeholder in '{template}'"));
        }
        if !name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_') {
            return Err(format!("placeholder '{name}' must use [a-z0-9_]"));
        }
        placeholders.insert(name.to_string());
        rest = &after[end + 1 ..];
    }
    Ok(placeholders)
}

#[test]
fn catalogs_have_matching_keys() {
    let en_keys: BTreeSet<&'static str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let locale_keys: BTreeSet<&'static str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, locale_keys, "locale catalogs must stay in parity ({locale:?})");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len(), "duplicate catalog keys ({locale:?})");
    }
}

#[test]
fn catalogs_have_placeholder_parity_with_english() {
    let en_catalog = catalog_for(Locale::En);
    for (key, en_template) in en_catalog {
        let en_placeholders = parse_placeholder_names(en_template).unwrap();
        for locale in SUPPORTED_LOCALES {
            let template = catalog_for(*locale).get(key).copied().unwrap();
            let placeholders = parse_placeholder_names(template)
                .unwrap_or_else(|error| panic!("{key} in {locale:?}: {error}"));
            assert_eq!(en_placeholders, placeholders, "placeholder mismatch for '{key}' ({locale:?})");
        }
    }
}

#[test]
fn locale_parsing_tolerates_region_tags() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse(" CA-es "), Some(Locale::Ca));
    assert_eq!(Locale::parse("en_US.UTF-8"), Some(Locale::En));
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::Ca.as_str(), "ca");
}

#[test]
fn translation_substitutes_and_falls_back() {
    let message = translate_for(
        Locale::Ca,
        "search.failed",
        vec![MessageArg::new("error", "boom")],
    );
    assert_eq!(message, "La cerca ha fallat: boom");
    assert_eq!(translate_for(Locale::En, "missing.key", Vec::new()), "missing.key");
}

// crates/capacity-search-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for localization.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The capacity-search CLI stores user-facing strings in a small translation
//! catalog to enforce consistent messaging across locales. All runtime output
//! should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
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

/// Global locale selection for CLI output.
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

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "capacity-search {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.serialize_failed", "Failed to serialize output: {error}"),
    ("input.kind.snapshot", "snapshot"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid: run {run_name}, preset {preset}, mode {mode}."),
    ("search.executor.missing", "No executor configured; add an [executor] section."),
    ("search.executor.init_failed", "Failed to initialize executor: {error}"),
    ("search.reporter.init_failed", "Failed to open snapshot log {path}: {error}"),
    ("search.audit.init_failed", "Failed to open audit log {path}: {error}"),
    ("search.sink.init_failed", "Failed to initialize result sink: {error}"),
    ("search.init_failed", "Failed to start search: {error}"),
    ("search.join_failed", "Search worker failed: {error}"),
    (
        "search.started",
        "Starting {run_name} ({mode}) at {start}: {count} datapoints from {first} to {last} rps, \
         {duration}s per iteration.",
    ),
    (
        "search.progress",
        "[{iteration}/{total}] {rps} rps: failure rate {failure_rate}, median {median_ms} ms, \
         best {best_rps} rps",
    ),
    ("search.failed", "Search failed: {error}"),
    (
        "search.completed",
        "Capacity: {capacity} rps (reached at {load} rps) after {iterations} iterations; stopped: \
         {reason}.",
    ),
    (
        "search.completed.none",
        "No acceptable load level found after {iterations} iterations; stopped: {reason}.",
    ),
    ("search.snapshot.location", "Snapshots written to {path}"),
    ("search.publish.ok", "Published capacity result."),
    ("search.publish.failed", "Warning: failed to publish capacity result: {error}"),
    ("datapoints.header", "{count} datapoints for {mode}:"),
    ("datapoints.failed", "Failed to generate datapoints: {error}"),
    ("evaluate.invalid", "Invalid measurement: {error}"),
    ("evaluate.result", "{mode}: acceptable={acceptable} must_stop={must_stop}"),
    ("snapshot.verify.ok", "Snapshot verified: {run_name} ({state}), {iterations} iterations, digest {digest}"),
    ("snapshot.verify.failed", "Snapshot verification failed: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "capacity-search {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.serialize_failed", "No s'ha pogut serialitzar la sortida: {error}"),
    ("input.kind.snapshot", "instantània"),
    ("input.read_failed", "No s'ha pogut llegir {kind} a {path}: {error}"),
    (
        "input.read_too_large",
        "Es rebutja llegir {kind} a {path} perquè té {size} bytes (límit {limit}).",
    ),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    (
        "config.validate.ok",
        "Configuració vàlida: execució {run_name}, perfil {preset}, mode {mode}.",
    ),
    (
        "search.executor.missing",
        "No hi ha cap executor configurat; afegiu una secció [executor].",
    ),
    ("search.executor.init_failed", "No s'ha pogut inicialitzar l'executor: {error}"),
    (
        "search.reporter.init_failed",
        "No s'ha pogut obrir el registre d'instantànies {path}: {error}",
    ),
    ("search.audit.init_failed", "No s'ha pogut obrir el registre d'auditoria {path}: {error}"),
    (
        "search.sink.init_failed",
        "No s'ha pogut inicialitzar la destinació de resultats: {error}",
    ),
    ("search.init_failed", "No s'ha pogut iniciar la cerca: {error}"),
    ("search.join_failed", "El treballador de la cerca ha fallat: {error}"),
    (
        "search.started",
        "S'inicia {run_name} ({mode}) a {start}: {count} punts de {first} a {last} rps, \
         {duration}s per iteració.",
    ),
    (
        "search.progress",
        "[{iteration}/{total}] {rps} rps: taxa d'error {failure_rate}, mediana {median_ms} ms, \
         millor {best_rps} rps",
    ),
    ("search.failed", "La cerca ha fallat: {error}"),
    (
        "search.completed",
        "Capacitat: {capacity} rps (assolida a {load} rps) després de {iterations} iteracions; \
         aturada: {reason}.",
    ),
    (
        "search.completed.none",
        "No s'ha trobat cap nivell de càrrega acceptable després de {iterations} iteracions; \
         aturada: {reason}.",
    ),
    ("search.snapshot.location", "Instantànies escrites a {path}"),
    ("search.publish.ok", "Resultat de capacitat publicat."),
    (
        "search.publish.failed",
        "Avís: no s'ha pogut publicar el resultat de capacitat: {error}",
    ),
    ("datapoints.header", "{count} punts per a {mode}:"),
    ("datapoints.failed", "No s'han pogut generar els punts: {error}"),
    ("evaluate.invalid", "Mesura no vàlida: {error}"),
    ("evaluate.result", "{mode}: acceptable={acceptable} must_stop={must_stop}"),
    (
        "snapshot.verify.ok",
        "Instantània verificada: {run_name} ({state}), {iterations} iteracions, resum {digest}",
    ),
    ("snapshot.verify.failed", "La verificació de la instantània ha fallat: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
#[must_use]
pub const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, args)
}

/// Translates `key` for an explicit locale while substituting `args`.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

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
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
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

// crates/capacity-search-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Library Unit Tests
// Description: Unit tests for the catalog and exit-code policy.
// Dependencies: capacity-search-cli library modules
// ============================================================================

//! ## Overview
//! Groups crate-internal tests that need access to private catalog helpers.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod exit;
mod i18n;

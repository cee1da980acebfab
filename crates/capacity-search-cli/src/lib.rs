// crates/capacity-search-cli/src/lib.rs
// ============================================================================
// Module: Capacity Search CLI Library
// Description: Shared helpers for the capacity-search binary.
// Purpose: Expose the message catalog and exit-code policy for reuse and tests.
// Dependencies: capacity-search-core
// ============================================================================

//! ## Overview
//! The `capacity-search` binary routes user-facing strings through
//! [`i18n`] and maps failures onto stable process exit codes via [`exit`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod exit;
pub mod i18n;

#[cfg(test)]
mod tests;

// crates/capacity-search-config/src/lib.rs
// ============================================================================
// Module: Capacity Search Config Library
// Description: Canonical config model, presets, and validation.
// Purpose: Single source of truth for capacity-search.toml semantics.
// Dependencies: capacity-search-core, serde, toml
// ============================================================================

//! ## Overview
//! `capacity-search-config` defines the configuration model for capacity
//! searches. It provides strict, fail-closed validation and converts a file
//! plus a mode into the immutable [`capacity_search_core::SearchConfig`] the
//! engine consumes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod presets;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use presets::*;

// crates/capacity-search-core/src/core/load.rs
// ============================================================================
// Module: Capacity Search Load Levels
// Description: Offered load values and measurement modes.
// Purpose: Provide strongly typed, serializable load levels with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Load levels are whole requests-per-second values. They serialize as plain
//! numbers and enforce the non-zero invariant at construction boundaries, so
//! every probe point handed to an executor is a positive rate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Load Level
// ============================================================================

/// Offered load in requests per second.
///
/// # Invariants
/// - Always >= 1 (non-zero).
/// - Ordering follows the numeric rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadLevel(NonZeroU64);

impl LoadLevel {
    /// Creates a load level from a non-zero rate.
    #[must_use]
    pub const fn new(rps: NonZeroU64) -> Self {
        Self(rps)
    }

    /// Creates a load level from a raw rate (returns `None` if zero).
    #[must_use]
    pub const fn from_raw(rps: u64) -> Option<Self> {
        match NonZeroU64::new(rps) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the raw rate in requests per second (always >= 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

// ============================================================================
// SECTION: Load Mode
// ============================================================================

/// Measurement profile driven against the target.
///
/// # Invariants
/// - Variants are stable for serialization and report matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Read-only query calls.
    #[default]
    Query,
    /// State-changing update calls.
    Update,
}

impl LoadMode {
    /// Returns the lowercase wire name (`query` / `update`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Update => "update",
        }
    }

    /// Returns the capitalized label used when publishing results.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Update => "Update",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

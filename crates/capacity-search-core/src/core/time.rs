// crates/capacity-search-core/src/core/time.rs
// ============================================================================
// Module: Capacity Search Time Model
// Description: Caller-supplied timestamps for experiment metadata.
// Purpose: Keep the engine free of wall-clock reads so runs replay identically.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core never reads the clock. Hosts stamp the experiment start time when
//! they build a publication, and audit sinks stamp their own write time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Timestamp attached to published capacity results.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value (tests and replays).
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }
}

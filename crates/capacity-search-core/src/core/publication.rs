// crates/capacity-search-core/src/core/publication.rs
// ============================================================================
// Module: Capacity Publication
// Description: Final capacity result forwarded to a result sink.
// Purpose: Name every field of the end-of-run result record.
// Dependencies: crate::core::time, serde
// ============================================================================

//! ## Overview
//! A publication is built once, after the search reaches `done`, and handed to
//! a [`ResultSink`](crate::interfaces::ResultSink) without retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Publication
// ============================================================================

/// Capacity result of a finished search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPublication {
    /// Experiment name (usually the driver name).
    pub experiment_name: String,
    /// Capitalized mode label (`Query` / `Update`).
    pub mode_label: String,
    /// Version identifier of the system under test.
    pub version_id_a: String,
    /// Version identifier of the baseline.
    pub version_id_b: String,
    /// Whether the run executed in CI.
    pub is_ci: bool,
    /// Best sustainable capacity in completions per second.
    pub capacity_rps: f64,
    /// Directory holding the run's snapshots.
    pub output_dir: String,
    /// Experiment start time.
    pub start_time: Timestamp,
}

/// Run metadata supplied by the host when publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationContext {
    /// Experiment name.
    pub experiment_name: String,
    /// Version identifier of the system under test.
    pub version_id_a: String,
    /// Version identifier of the baseline.
    pub version_id_b: String,
    /// Whether the run executed in CI.
    pub is_ci: bool,
    /// Directory holding the run's snapshots.
    pub output_dir: String,
    /// Experiment start time.
    pub start_time: Timestamp,
}

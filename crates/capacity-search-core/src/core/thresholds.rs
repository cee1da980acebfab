// crates/capacity-search-core/src/core/thresholds.rs
// ============================================================================
// Module: Capacity Search Thresholds
// Description: Allowable and stop threshold pairs and iteration verdicts.
// Purpose: Describe the pass/fail limits applied to each iteration.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Two threshold tiers classify every iteration. The *allowable* pair decides
//! whether an iteration may update the capacity record; the *stop* pair
//! decides whether the search must end. Both are exclusive upper bounds for
//! acceptance and inclusive lower bounds for stopping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Threshold Pair
// ============================================================================

/// Failure-rate and median-latency limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    /// Failure rate limit as a fraction in `[0, 1]`.
    pub failure_rate: f64,
    /// Median latency limit in milliseconds.
    pub median_latency_ms: f64,
}

impl ThresholdPair {
    /// Creates a threshold pair.
    #[must_use]
    pub const fn new(failure_rate: f64, median_latency_ms: f64) -> Self {
        Self {
            failure_rate,
            median_latency_ms,
        }
    }
}

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Allowable and stop threshold tiers for one measurement mode.
///
/// # Invariants
/// - Callers must keep `stop >= allowable` for both metrics; the evaluator does
///   not enforce the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Limits below which an iteration counts toward capacity.
    pub allowable: ThresholdPair,
    /// Limits at or above which the search stops.
    pub stop: ThresholdPair,
}

impl Thresholds {
    /// Returns true when both stop limits are at least the allowable limits.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.stop.failure_rate >= self.allowable.failure_rate
            && self.stop.median_latency_ms >= self.allowable.median_latency_ms
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Classification of one iteration against both threshold tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Iteration is eligible to update the capacity record.
    pub acceptable: bool,
    /// Iteration saturated the target and terminates the search.
    pub must_stop: bool,
}

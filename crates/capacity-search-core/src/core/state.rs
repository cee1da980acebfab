// crates/capacity-search-core/src/core/state.rs
// ============================================================================
// Module: Capacity Search State
// Description: Capacity record, iteration history, and search status.
// Purpose: Capture the evolution of one capacity search for reporting.
// Dependencies: crate::core::{load, summary, thresholds}, serde
// ============================================================================

//! ## Overview
//! Search state is owned by the engine and mutated exactly once per round.
//! History is append-only and the capacity record never decreases. Reporters
//! only ever observe the state through shared borrows taken after a round has
//! completed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::load::LoadLevel;
use crate::core::load::LoadMode;
use crate::core::summary::IterationSummary;
use crate::core::thresholds::Verdict;

// ============================================================================
// SECTION: Capacity Record
// ============================================================================

/// Best sustainable throughput observed so far.
///
/// # Invariants
/// - `achieved_rps` never decreases within a run.
/// - `at_load_level` is `None` until the first acceptable iteration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityRecord {
    /// Achieved completions per second.
    pub achieved_rps: f64,
    /// Offered load that produced the record.
    pub at_load_level: Option<LoadLevel>,
}

impl CapacityRecord {
    /// Returns the empty record `(0, none)`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            achieved_rps: 0.0,
            at_load_level: None,
        }
    }
}

// ============================================================================
// SECTION: History
// ============================================================================

/// One completed iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based iteration number.
    pub iteration: u64,
    /// Offered load for the iteration.
    pub load: LoadLevel,
    /// Executor summary.
    pub summary: IterationSummary,
    /// Threshold classification.
    pub verdict: Verdict,
}

/// Append-only iteration log.
///
/// # Invariants
/// - Entries are ordered by completion and are never rewritten or removed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    /// Completed iterations in order.
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a completed iteration.
    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Returns the completed iterations.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns the number of completed iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no iteration has completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the offered load of every completed iteration.
    #[must_use]
    pub fn load_levels(&self) -> Vec<LoadLevel> {
        self.entries.iter().map(|entry| entry.load).collect()
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// Reason a search ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// An iteration met or exceeded a stop threshold.
    ThresholdBreach,
    /// Every datapoint was measured without a stop signal.
    Exhausted,
}

impl StopReason {
    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThresholdBreach => "threshold_breach",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Search lifecycle status.
///
/// # Invariants
/// - `Done` is entered only after the terminating snapshot was reported.
/// - `Failed` is terminal and entered on executor failure or when a snapshot
///   failure aborts the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SearchStatus {
    /// Rounds remain and no stop signal fired.
    Running,
    /// A stop threshold fired; the final snapshot is pending.
    StoppedByThreshold,
    /// The sequence was consumed; the final snapshot is pending.
    Exhausted,
    /// Final snapshot reported; the search is complete.
    Done(StopReason),
    /// The search was aborted by an executor or snapshot failure.
    Failed,
}

impl SearchStatus {
    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::StoppedByThreshold => "stopped_by_threshold",
            Self::Exhausted => "exhausted",
            Self::Done(_) => "done",
            Self::Failed => "failed",
        }
    }
}

// ============================================================================
// SECTION: Search State
// ============================================================================

/// Full state of one capacity search run.
///
/// # Invariants
/// - `history.len()` equals the number of completed iterations.
/// - `iteration_index` counts rounds started, including a failed last round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Run name used for snapshots.
    pub run_name: String,
    /// Measurement mode.
    pub mode: LoadMode,
    /// Lifecycle status.
    pub status: SearchStatus,
    /// Number of rounds started.
    pub iteration_index: u64,
    /// Best capacity record.
    pub best: CapacityRecord,
    /// Completed iterations.
    pub history: SearchHistory,
}

impl SearchState {
    /// Creates the initial state for a run.
    #[must_use]
    pub fn new(run_name: impl Into<String>, mode: LoadMode) -> Self {
        Self {
            run_name: run_name.into(),
            mode,
            status: SearchStatus::Running,
            iteration_index: 0,
            best: CapacityRecord::empty(),
            history: SearchHistory::new(),
        }
    }

    /// Returns true while further rounds will be attempted.
    #[must_use]
    pub const fn running(&self) -> bool {
        matches!(self.status, SearchStatus::Running)
    }
}

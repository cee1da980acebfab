// crates/capacity-search-core/src/core/snapshot.rs
// ============================================================================
// Module: Capacity Search Snapshots
// Description: Read-only views of search state handed to reporters.
// Purpose: Define the per-iteration snapshot contract and its flat payload.
// Dependencies: crate::core::{load, state}, serde
// ============================================================================

//! ## Overview
//! A [`SearchSnapshot`] borrows the engine state after a completed round, so a
//! reporter can never mutate what it persists. The flat [`SnapshotPayload`]
//! mirrors the summary document consumed by dashboards: tried rates, best
//! capacity, where it was achieved, and per-iteration counters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::load::LoadLevel;
use crate::core::load::LoadMode;
use crate::core::state::SearchState;

// ============================================================================
// SECTION: Snapshot State Tag
// ============================================================================

/// Progress tag attached to each snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotState {
    /// More rounds follow.
    Running,
    /// This is the terminating round.
    Done,
}

impl SnapshotState {
    /// Returns the stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

// ============================================================================
// SECTION: Snapshot Payload
// ============================================================================

/// Flat summary mapping persisted with every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPayload {
    /// Load levels tried so far, in order.
    pub rps: Vec<LoadLevel>,
    /// Best achieved throughput.
    pub rps_max: f64,
    /// Load level at which the best throughput was achieved.
    pub rps_max_in: Option<LoadLevel>,
    /// Successful request count per iteration.
    pub num_succ_per_iteration: Vec<u64>,
    /// Failure rate per iteration.
    pub failure_rate_per_iteration: Vec<f64>,
    /// Median latency (ms) per iteration.
    pub median_latency_per_iteration: Vec<f64>,
}

impl SnapshotPayload {
    /// Builds the payload from the current search state.
    #[must_use]
    pub fn from_state(state: &SearchState) -> Self {
        let entries = state.history.entries();
        Self {
            rps: state.history.load_levels(),
            rps_max: state.best.achieved_rps,
            rps_max_in: state.best.at_load_level,
            num_succ_per_iteration: entries
                .iter()
                .map(|entry| entry.summary.successful_requests)
                .collect(),
            failure_rate_per_iteration: entries
                .iter()
                .map(|entry| entry.summary.failure_rate)
                .collect(),
            median_latency_per_iteration: entries
                .iter()
                .map(|entry| entry.summary.median_latency_ms)
                .collect(),
        }
    }
}

// ============================================================================
// SECTION: Search Snapshot
// ============================================================================

/// Read-only snapshot of a search after a completed round.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSnapshot<'a> {
    /// Run name used as the snapshot key.
    pub run_name: &'a str,
    /// Label of the load axis (e.g. `requests / s`).
    pub axis_label: &'a str,
    /// Measurement mode.
    pub mode: LoadMode,
    /// Progress tag.
    pub state: SnapshotState,
    /// Flat summary payload.
    pub payload: SnapshotPayload,
    /// Load levels tried so far; grows by one per snapshot.
    pub history_rps: Vec<LoadLevel>,
    /// Full search state.
    pub search: &'a SearchState,
}

impl<'a> SearchSnapshot<'a> {
    /// Creates a snapshot view over the search state.
    #[must_use]
    pub fn new(search: &'a SearchState, axis_label: &'a str, state: SnapshotState) -> Self {
        Self {
            run_name: &search.run_name,
            axis_label,
            mode: search.mode,
            state,
            payload: SnapshotPayload::from_state(search),
            history_rps: search.history.load_levels(),
            search,
        }
    }

    /// Copies the snapshot into an owned record.
    #[must_use]
    pub fn to_owned_snapshot(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            run_name: self.run_name.to_string(),
            axis_label: self.axis_label.to_string(),
            mode: self.mode,
            state: self.state,
            payload: self.payload.clone(),
            history_rps: self.history_rps.clone(),
            search: self.search.clone(),
        }
    }
}

/// Owned copy of a [`SearchSnapshot`], used by recorders and snapshot files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedSnapshot {
    /// Run name used as the snapshot key.
    pub run_name: String,
    /// Label of the load axis.
    pub axis_label: String,
    /// Measurement mode.
    pub mode: LoadMode,
    /// Progress tag.
    pub state: SnapshotState,
    /// Flat summary payload.
    pub payload: SnapshotPayload,
    /// Load levels tried so far.
    pub history_rps: Vec<LoadLevel>,
    /// Full search state.
    pub search: SearchState,
}

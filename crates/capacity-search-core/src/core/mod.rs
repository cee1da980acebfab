// crates/capacity-search-core/src/core/mod.rs
// ============================================================================
// Module: Capacity Search Core Types
// Description: Canonical data model for capacity searches.
// Purpose: Provide stable, serializable types for configuration, state, and reports.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define load levels, measurement summaries, thresholds, search
//! state, snapshots, and publications. These types are the canonical source of
//! truth for every adapter (config files, executors, reporters, CLI output).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod datapoints;
pub mod hashing;
pub mod load;
pub mod publication;
pub mod search;
pub mod snapshot;
pub mod state;
pub mod summary;
pub mod thresholds;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use datapoints::DatapointError;
pub use datapoints::DatapointPlan;
pub use datapoints::DatapointSequence;
pub use datapoints::MAX_DATAPOINTS;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::SNAPSHOT_DIGEST_ALGORITHM;
pub use hashing::snapshot_digest;
pub use load::LoadLevel;
pub use load::LoadMode;
pub use publication::CapacityPublication;
pub use publication::PublicationContext;
pub use search::ConfigurationError;
pub use search::DEFAULT_AXIS_LABEL;
pub use search::ReporterFailurePolicy;
pub use search::SearchConfig;
pub use snapshot::OwnedSnapshot;
pub use snapshot::SearchSnapshot;
pub use snapshot::SnapshotPayload;
pub use snapshot::SnapshotState;
pub use state::CapacityRecord;
pub use state::HistoryEntry;
pub use state::SearchHistory;
pub use state::SearchState;
pub use state::SearchStatus;
pub use state::StopReason;
pub use summary::IterationSummary;
pub use summary::SummaryError;
pub use thresholds::ThresholdPair;
pub use thresholds::Thresholds;
pub use thresholds::Verdict;
pub use time::Timestamp;

// crates/capacity-search-core/src/runtime/mod.rs
// ============================================================================
// Module: Capacity Search Runtime
// Description: Datapoint generator, threshold evaluator, and search engine.
// Purpose: Execute capacity searches against pluggable collaborators.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the decision logic: the pure generator and evaluator,
//! the stateful [`CapacitySearch`] loop, and in-memory collaborators for tests
//! and dry runs.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod datapoints;
pub mod engine;
pub mod store;
pub mod thresholds;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use datapoints::generate_datapoints;
pub use engine::CapacitySearch;
pub use engine::SearchError;
pub use engine::SearchOutcome;
pub use engine::StepOutcome;
pub use store::InMemoryResultSink;
pub use store::InMemorySnapshotReporter;
pub use store::NoopAuditSink;
pub use store::RecordingAuditSink;
pub use thresholds::ThresholdEvaluator;
pub use thresholds::evaluate;

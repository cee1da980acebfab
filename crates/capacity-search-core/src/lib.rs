// crates/capacity-search-core/src/lib.rs
// ============================================================================
// Module: Capacity Search Core Library
// Description: Public API surface for the capacity search core.
// Purpose: Expose the data model, collaborator interfaces, and search runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Capacity search determines the highest request rate a target service can
//! sustain without violating failure-rate and latency limits. The core owns
//! only the decision logic; request generation, persistence, and publication
//! are reached through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ExecutorError;
pub use interfaces::IterationExecutor;
pub use interfaces::IterationRequest;
pub use interfaces::PublishError;
pub use interfaces::ReportError;
pub use interfaces::ResultSink;
pub use interfaces::SearchAuditEvent;
pub use interfaces::SearchAuditSink;
pub use interfaces::SnapshotReporter;
pub use runtime::CapacitySearch;
pub use runtime::InMemoryResultSink;
pub use runtime::InMemorySnapshotReporter;
pub use runtime::NoopAuditSink;
pub use runtime::RecordingAuditSink;
pub use runtime::SearchError;
pub use runtime::SearchOutcome;
pub use runtime::StepOutcome;
pub use runtime::ThresholdEvaluator;
pub use runtime::evaluate;
pub use runtime::generate_datapoints;

// crates/capacity-search-core/src/interfaces/mod.rs
// ============================================================================
// Module: Capacity Search Interfaces
// Description: Backend-agnostic interfaces for measurement, reporting, and audit.
// Purpose: Define the contract surfaces used by the capacity search engine.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The engine never issues requests or touches storage itself. It drives an
//! [`IterationExecutor`], persists progress through a [`SnapshotReporter`],
//! hands the final result to a [`ResultSink`], and emits structured events to a
//! [`SearchAuditSink`]. Implementations live in adapter crates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::core::CapacityPublication;
use crate::core::IterationSummary;
use crate::core::LoadLevel;
use crate::core::LoadMode;
use crate::core::SearchSnapshot;

// ============================================================================
// SECTION: Iteration Executor
// ============================================================================

/// Parameters of one measurement iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationRequest<'a> {
    /// 1-based iteration number.
    pub iteration: u64,
    /// Offered load to drive.
    pub load: LoadLevel,
    /// Requested workload duration.
    pub duration: Duration,
    /// Measurement mode.
    pub mode: LoadMode,
    /// Extra parameters from configuration (e.g. payload size).
    pub extra_params: &'a BTreeMap<String, String>,
}

/// Executor errors.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The workload generator could not be started or did not finish.
    #[error("workload generator failed: {0}")]
    Workload(String),
    /// The target system returned a transport-level error.
    #[error("target error: {0}")]
    Target(String),
    /// The executor produced an unreadable report.
    #[error("invalid workload report: {0}")]
    Report(String),
    /// No recorded measurement remains.
    #[error("no measurement available for iteration {0}")]
    Exhausted(u64),
}

/// Drives load against the target and summarizes one iteration.
///
/// Implementations may fan out concurrent requests internally; the engine
/// waits for each call to return before doing anything else.
pub trait IterationExecutor {
    /// Runs one iteration at the requested load.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] when the measurement cannot be completed. The
    /// engine does not retry.
    fn run(&mut self, request: &IterationRequest<'_>) -> Result<IterationSummary, ExecutorError>;
}

// ============================================================================
// SECTION: Snapshot Reporter
// ============================================================================

/// Snapshot reporter errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Snapshot I/O failed.
    #[error("snapshot io error: {0}")]
    Io(String),
    /// Snapshot serialization failed.
    #[error("snapshot serialization error: {0}")]
    Serialize(String),
    /// Reporter rejected the snapshot.
    #[error("snapshot reporter error: {0}")]
    Reporter(String),
}

/// Persists a snapshot after every completed iteration.
pub trait SnapshotReporter {
    /// Writes the current snapshot, replacing any earlier snapshot of the run.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the snapshot cannot be persisted.
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError>;
}

// ============================================================================
// SECTION: Result Sink
// ============================================================================

/// Result sink errors.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Sink I/O failed.
    #[error("publish io error: {0}")]
    Io(String),
    /// Remote backend rejected or could not receive the result.
    #[error("publish backend error: {0}")]
    Backend(String),
}

/// Receives the final capacity of a finished search.
pub trait ResultSink {
    /// Publishes the capacity result. Called once per run, never retried.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when publication fails.
    fn publish_capacity(&self, publication: &CapacityPublication) -> Result<(), PublishError>;
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Structured audit event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Run name.
    pub run_name: String,
    /// Measurement mode.
    pub mode: LoadMode,
    /// Iteration number, for per-iteration events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u64>,
    /// Offered load, for per-iteration events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_rps: Option<LoadLevel>,
    /// Measured failure rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_rate: Option<f64>,
    /// Measured median latency in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_latency_ms: Option<f64>,
    /// Iteration was acceptable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable: Option<bool>,
    /// Iteration breached a stop threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_stop: Option<bool>,
    /// Best capacity so far.
    pub best_rps: f64,
    /// Load level of the best capacity so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_load_rps: Option<LoadLevel>,
    /// Outcome or stop reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    /// Error message for failure events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchAuditEvent {
    /// Creates an event with no per-iteration fields.
    #[must_use]
    pub fn new(event: &'static str, run_name: impl Into<String>, mode: LoadMode) -> Self {
        Self {
            event,
            run_name: run_name.into(),
            mode,
            iteration: None,
            load_rps: None,
            failure_rate: None,
            median_latency_ms: None,
            acceptable: None,
            must_stop: None,
            best_rps: 0.0,
            best_load_rps: None,
            outcome: None,
            message: None,
        }
    }
}

/// Audit sink for search events.
pub trait SearchAuditSink {
    /// Records an audit event. Sinks must not fail the search.
    fn record(&self, event: &SearchAuditEvent);
}

impl<T: SearchAuditSink + ?Sized> SearchAuditSink for &T {
    fn record(&self, event: &SearchAuditEvent) {
        (**self).record(event);
    }
}

impl<T: SearchAuditSink + ?Sized> SearchAuditSink for Box<T> {
    fn record(&self, event: &SearchAuditEvent) {
        (**self).record(event);
    }
}

impl<T: SnapshotReporter + ?Sized> SnapshotReporter for &T {
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError> {
        (**self).write_snapshot(snapshot)
    }
}

impl<T: SnapshotReporter + ?Sized> SnapshotReporter for Box<T> {
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError> {
        (**self).write_snapshot(snapshot)
    }
}

impl<T: ResultSink + ?Sized> ResultSink for Box<T> {
    fn publish_capacity(&self, publication: &CapacityPublication) -> Result<(), PublishError> {
        (**self).publish_capacity(publication)
    }
}

impl<T: IterationExecutor + ?Sized> IterationExecutor for Box<T> {
    fn run(&mut self, request: &IterationRequest<'_>) -> Result<IterationSummary, ExecutorError> {
        (**self).run(request)
    }
}

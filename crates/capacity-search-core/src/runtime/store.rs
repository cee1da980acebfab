// crates/capacity-search-core/src/runtime/store.rs
// ============================================================================
// Module: Capacity Search In-Memory Collaborators
// Description: In-memory reporter, result sink, and audit sinks.
// Purpose: Provide deterministic collaborators for tests and dry runs.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! These implementations keep everything in memory behind shared mutexes so a
//! caller can hand one clone to the engine and inspect another afterwards.
//! They are not intended for production reporting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::CapacityPublication;
use crate::core::OwnedSnapshot;
use crate::core::SearchSnapshot;
use crate::interfaces::PublishError;
use crate::interfaces::ReportError;
use crate::interfaces::ResultSink;
use crate::interfaces::SearchAuditEvent;
use crate::interfaces::SearchAuditSink;
use crate::interfaces::SnapshotReporter;

// ============================================================================
// SECTION: Snapshot Reporter
// ============================================================================

/// In-memory snapshot reporter that keeps every reported snapshot.
#[derive(Debug, Default, Clone)]
pub struct InMemorySnapshotReporter {
    /// Reported snapshots in order.
    snapshots: Arc<Mutex<Vec<OwnedSnapshot>>>,
}

impl InMemorySnapshotReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every reported snapshot.
    #[must_use]
    pub fn snapshots(&self) -> Vec<OwnedSnapshot> {
        self.snapshots.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Returns the most recent snapshot, if any.
    #[must_use]
    pub fn latest(&self) -> Option<OwnedSnapshot> {
        self.snapshots.lock().ok().and_then(|guard| guard.last().cloned())
    }
}

impl SnapshotReporter for InMemorySnapshotReporter {
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError> {
        self.snapshots
            .lock()
            .map_err(|_| ReportError::Reporter("snapshot reporter mutex poisoned".to_string()))?
            .push(snapshot.to_owned_snapshot());
        Ok(())
    }
}

// ============================================================================
// SECTION: Result Sink
// ============================================================================

/// In-memory result sink.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResultSink {
    /// Published results in order.
    published: Arc<Mutex<Vec<CapacityPublication>>>,
}

impl InMemoryResultSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every published result.
    #[must_use]
    pub fn published(&self) -> Vec<CapacityPublication> {
        self.published.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl ResultSink for InMemoryResultSink {
    fn publish_capacity(&self, publication: &CapacityPublication) -> Result<(), PublishError> {
        self.published
            .lock()
            .map_err(|_| PublishError::Io("result sink mutex poisoned".to_string()))?
            .push(publication.clone());
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit Sinks
// ============================================================================

/// Audit sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl SearchAuditSink for NoopAuditSink {
    fn record(&self, _event: &SearchAuditEvent) {}
}

/// Audit sink that keeps events in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingAuditSink {
    /// Recorded events in order.
    events: Arc<Mutex<Vec<SearchAuditEvent>>>,
}

impl RecordingAuditSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<SearchAuditEvent> {
        self.events.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Returns the names of recorded events in order.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events().iter().map(|event| event.event).collect()
    }
}

impl SearchAuditSink for RecordingAuditSink {
    fn record(&self, event: &SearchAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}

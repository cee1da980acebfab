// crates/capacity-search-broker/src/audit.rs
// ============================================================================
// Module: Search Audit Sinks
// Description: JSON-line audit sinks for search lifecycle events.
// Purpose: Emit structured search logs without a logging framework.
// Dependencies: capacity-search-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit sinks stamp each [`SearchAuditEvent`] with a wall-clock
//! `timestamp_ms` and write it as one JSON line. Write failures are dropped so
//! auditing never changes the search outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use capacity_search_core::SearchAuditEvent;
use capacity_search_core::SearchAuditSink;
use serde::Serialize;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Audit event stamped at write time.
#[derive(Serialize)]
struct StampedAuditEvent<'a> {
    /// Event timestamp (milliseconds since epoch).
    timestamp_ms: u128,
    /// Engine event.
    #[serde(flatten)]
    event: &'a SearchAuditEvent,
}

/// Serializes an event into a stamped JSON line.
fn audit_line(event: &SearchAuditEvent) -> Option<String> {
    let timestamp_ms = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    serde_json::to_string(&StampedAuditEvent {
        timestamp_ms,
        event,
    })
    .ok()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl SearchAuditSink for StderrAuditSink {
    fn record(&self, event: &SearchAuditEvent) {
        if let Some(payload) = audit_line(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SearchAuditSink for FileAuditSink {
    fn record(&self, event: &SearchAuditEvent) {
        if let Some(payload) = audit_line(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

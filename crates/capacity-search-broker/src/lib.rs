// crates/capacity-search-broker/src/lib.rs
// ============================================================================
// Module: Capacity Search Broker Library
// Description: Reference reporters, result sinks, and audit sinks.
// Purpose: Persist snapshots and deliver final capacities.
// Dependencies: capacity-search-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! Capacity Search Broker provides ready-made implementations of the core
//! collaborator traits: snapshot reporters, result sinks, and audit sinks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod publish;
pub mod snapshot;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::StderrAuditSink;
pub use publish::FileResultSink;
pub use publish::HttpResultSink;
pub use publish::LogResultSink;
pub use snapshot::FanOutSnapshotReporter;
pub use snapshot::FileSnapshotReporter;
pub use snapshot::LogSnapshotReporter;
pub use snapshot::MAX_SNAPSHOT_BYTES;
pub use snapshot::SNAPSHOT_FORMAT;
pub use snapshot::SnapshotDocument;
pub use snapshot::SnapshotVerifyError;
pub use snapshot::read_snapshot_document;
pub use snapshot::verify_snapshot_document;

// crates/capacity-search-broker/tests/snapshots.rs
// ============================================================================
// Module: Snapshot Reporter Tests
// Description: Tests for file/log snapshot reporters and verification.
// ============================================================================
//! ## Overview
//! Drives a short search through the real reporters and checks the persisted
//! documents verify, reflect the latest round, and detect tampering.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use capacity_search_broker::FanOutSnapshotReporter;
use capacity_search_broker::FileSnapshotReporter;
use capacity_search_broker::LogSnapshotReporter;
use capacity_search_broker::SNAPSHOT_FORMAT;
use capacity_search_broker::SnapshotVerifyError;
use capacity_search_broker::read_snapshot_document;
use capacity_search_broker::verify_snapshot_document;
use capacity_search_core::CapacitySearch;
use capacity_search_core::DEFAULT_AXIS_LABEL;
use capacity_search_core::DatapointPlan;
use capacity_search_core::ExecutorError;
use capacity_search_core::IterationExecutor;
use capacity_search_core::IterationRequest;
use capacity_search_core::IterationSummary;
use capacity_search_core::LoadMode;
use capacity_search_core::NoopAuditSink;
use capacity_search_core::OwnedSnapshot;
use capacity_search_core::ReporterFailurePolicy;
use capacity_search_core::SearchConfig;
use capacity_search_core::SnapshotState;
use capacity_search_core::ThresholdPair;
use capacity_search_core::Thresholds;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Executor whose latency grows with load.
struct LinearExecutor;

impl IterationExecutor for LinearExecutor {
    fn run(&mut self, request: &IterationRequest<'_>) -> Result<IterationSummary, ExecutorError> {
        let rps = request.load.get();
        Ok(IterationSummary::new(0.0, 10.0 * f64::from(u32::try_from(rps).unwrap()), rps * 10, 10.0))
    }
}

/// Builds a three-round search configuration.
fn config(run_name: &str) -> SearchConfig {
    SearchConfig {
        run_name: run_name.to_string(),
        mode: LoadMode::Query,
        axis_label: DEFAULT_AXIS_LABEL.to_string(),
        iteration_duration: Duration::from_secs(10),
        plan: DatapointPlan {
            target_rps: 30,
            initial_rps: 10,
            max_rps: 30,
            increment_rps: 10,
            growth_factor: 1.0,
        },
        thresholds: Thresholds {
            allowable: ThresholdPair::new(0.2, 5_000.0),
            stop: ThresholdPair::new(0.95, 25_000.0),
        },
        extra_params: BTreeMap::new(),
        on_snapshot_failure: ReporterFailurePolicy::Abort,
    }
}

// ============================================================================
// SECTION: File Reporter
// ============================================================================

/// Tests the file reporter leaves a verified document for the final round.
#[test]
fn test_file_reporter_writes_verified_latest_snapshot() {
    let dir = TempDir::new().unwrap();
    let reporter = FileSnapshotReporter::new(dir.path().join("out"));
    let path = reporter.snapshot_path("run_large_memory_experiment");
    let mut search =
        CapacitySearch::new(config("run_large_memory_experiment"), LinearExecutor, reporter, NoopAuditSink)
            .unwrap();
    let outcome = search.run().unwrap();
    assert_eq!(outcome.iterations, 3);

    let document = read_snapshot_document(&path).unwrap();
    assert_eq!(document.format, SNAPSHOT_FORMAT);
    assert_eq!(document.snapshot.state, SnapshotState::Done);
    assert_eq!(document.snapshot.history_rps.len(), 3);
    assert_eq!(document.snapshot.payload.num_succ_per_iteration, vec![100, 200, 300]);
    assert!((document.snapshot.payload.rps_max - 30.0).abs() < f64::EPSILON);
    assert_eq!(&document.snapshot.search, search.state());
    assert!(!path.with_extension("json.tmp").exists());
}

/// Tests run names are mapped onto safe file names.
#[test]
fn test_file_reporter_sanitizes_run_names() {
    let reporter = FileSnapshotReporter::new("/tmp/out");
    let path = reporter.snapshot_path("../nightly run");
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "___nightly_run.json");
    assert_eq!(path.parent().unwrap().to_str().unwrap(), "/tmp/out");
}

/// Tests edited documents fail verification.
#[test]
fn test_tampered_document_is_detected() {
    let dir = TempDir::new().unwrap();
    let reporter = FileSnapshotReporter::new(dir.path());
    let path = reporter.snapshot_path("tamper");
    let mut search = CapacitySearch::new(config("tamper"), LinearExecutor, reporter, NoopAuditSink).unwrap();
    search.run().unwrap();

    let original = fs::read_to_string(&path).unwrap();
    let tampered = original.replacen("\"rps_max\": 30.0", "\"rps_max\": 3000.0", 1);
    assert_ne!(original, tampered);
    let err = verify_snapshot_document(tampered.as_bytes()).unwrap_err();
    assert!(matches!(err, SnapshotVerifyError::DigestMismatch { .. }));

    let foreign = original.replacen("\"algorithm\": \"sha256\"", "\"algorithm\": \"md5\"", 1);
    assert_ne!(original, foreign);
    assert!(matches!(
        verify_snapshot_document(foreign.as_bytes()),
        Err(SnapshotVerifyError::Hash(_))
    ));

    let wrong_format = original.replacen(SNAPSHOT_FORMAT, "other.v0", 1);
    assert!(matches!(
        verify_snapshot_document(wrong_format.as_bytes()),
        Err(SnapshotVerifyError::Format(_))
    ));
    assert!(matches!(verify_snapshot_document(b"[]"), Err(SnapshotVerifyError::Parse(_))));
    assert!(matches!(
        read_snapshot_document(&dir.path().join("absent.json")),
        Err(SnapshotVerifyError::Io(_))
    ));
}

// ============================================================================
// SECTION: Log Reporter
// ============================================================================

/// Tests the log reporter appends one line per round.
#[test]
fn test_log_reporter_appends_lines() {
    let reporter = LogSnapshotReporter::new(Vec::new());
    let mut search = CapacitySearch::new(config("log"), LinearExecutor, &reporter, NoopAuditSink).unwrap();
    search.run().unwrap();
    drop(search);

    let bytes = reporter.into_inner().unwrap();
    let lines: Vec<OwnedSnapshot> = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.iter().map(|snapshot| snapshot.history_rps.len()).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(lines[0].state, SnapshotState::Running);
    assert_eq!(lines[2].state, SnapshotState::Done);
}

/// Tests the fan-out reporter writes to every reporter.
#[test]
fn test_fan_out_reporter_writes_all() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("snapshots.jsonl");
    let log_file = fs::File::create(&log_path).unwrap();
    let file_reporter = FileSnapshotReporter::new(dir.path());
    let document_path = file_reporter.snapshot_path("fan");
    let reporter = FanOutSnapshotReporter::new(vec![
        Box::new(file_reporter),
        Box::new(LogSnapshotReporter::new(log_file)),
    ]);
    let mut search = CapacitySearch::new(config("fan"), LinearExecutor, reporter, NoopAuditSink).unwrap();
    search.run().unwrap();

    assert!(read_snapshot_document(&document_path).is_ok());
    assert_eq!(fs::read_to_string(&log_path).unwrap().lines().count(), 3);
}

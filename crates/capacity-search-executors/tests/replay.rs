// crates/capacity-search-executors/tests/replay.rs
// ============================================================================
// Module: Replay Executor Tests
// Description: Tests for report parsing and recorded-report replay.
// ============================================================================
//! ## Overview
//! Covers median selection, elapsed fallback, replay ordering, and exhaustion.

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

use capacity_search_core::ExecutorError;
use capacity_search_core::IterationExecutor;
use capacity_search_core::IterationRequest;
use capacity_search_core::LoadLevel;
use capacity_search_core::LoadMode;
use capacity_search_executors::ReplayExecutor;
use capacity_search_executors::WorkloadReport;
use capacity_search_executors::parse_report;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a request at the given iteration and load.
fn request(iteration: u64, rps: u64, params: &BTreeMap<String, String>) -> IterationRequest<'_> {
    IterationRequest {
        iteration,
        load: LoadLevel::from_raw(rps).unwrap(),
        duration: Duration::from_secs(10),
        mode: LoadMode::Query,
        extra_params: params,
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Tests the slowest per-target median is the iteration median.
#[test]
fn test_report_median_is_max_of_targets() {
    let report = parse_report(
        br#"{"failure_rate":0.0,"median_latencies_ms":[12.0,40.0,7.5],"successful_requests":90}"#,
    )
    .unwrap();
    assert_eq!(report.median(), Some(40.0));

    let summary = report.into_summary(3.0).unwrap();
    assert!((summary.median_latency_ms - 40.0).abs() < f64::EPSILON);
    assert!((summary.elapsed_secs - 3.0).abs() < f64::EPSILON);
}

/// Tests the single median field is merged with per-target medians.
#[test]
fn test_report_single_median_counts() {
    let report = parse_report(
        br#"{"failure_rate":0.1,"median_latency_ms":55.0,"median_latencies_ms":[20.0],"successful_requests":5,"elapsed_secs":2.5}"#,
    )
    .unwrap();
    let summary = report.into_summary(99.0).unwrap();
    assert!((summary.median_latency_ms - 55.0).abs() < f64::EPSILON);
    assert!((summary.elapsed_secs - 2.5).abs() < f64::EPSILON);
}

/// Tests a report without any median is rejected.
#[test]
fn test_report_without_median_is_rejected() {
    let report = parse_report(br#"{"failure_rate":0.0,"successful_requests":1}"#).unwrap();
    assert!(matches!(report.into_summary(1.0), Err(ExecutorError::Report(_))));
    assert!(matches!(parse_report(b"not json"), Err(ExecutorError::Report(_))));
}

// ============================================================================
// SECTION: Replay
// ============================================================================

/// Tests reports are served in order and exhaustion is an error.
#[test]
fn test_replay_serves_in_order_then_exhausts() {
    let params = BTreeMap::new();
    let mut executor = ReplayExecutor::from_reports(vec![
        WorkloadReport {
            failure_rate: 0.0,
            median_latency_ms: Some(10.0),
            median_latencies_ms: Vec::new(),
            successful_requests: 100,
            total_requests: Some(100),
            elapsed_secs: None,
            average_latency_ms: None,
            min_latency_ms: None,
            max_latency_ms: None,
        },
        WorkloadReport {
            failure_rate: 0.5,
            median_latency_ms: Some(900.0),
            median_latencies_ms: Vec::new(),
            successful_requests: 50,
            total_requests: Some(100),
            elapsed_secs: Some(5.0),
            average_latency_ms: None,
            min_latency_ms: None,
            max_latency_ms: None,
        },
    ]);
    assert_eq!(executor.remaining(), 2);

    let first = executor.run(&request(1, 10, &params)).unwrap();
    assert!((first.elapsed_secs - 10.0).abs() < f64::EPSILON);
    assert_eq!(first.successful_requests, 100);

    let second = executor.run(&request(2, 20, &params)).unwrap();
    assert!((second.failure_rate - 0.5).abs() < f64::EPSILON);
    assert!((second.elapsed_secs - 5.0).abs() < f64::EPSILON);

    let third = executor.run(&request(3, 30, &params));
    assert!(matches!(third, Err(ExecutorError::Exhausted(3))));
}

/// Tests replay files are loaded from disk under a size limit.
#[test]
fn test_replay_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("replay.json");
    fs::write(
        &path,
        br#"[{"failure_rate":0.0,"median_latency_ms":4.0,"successful_requests":8,"elapsed_secs":1.0}]"#,
    )
    .unwrap();

    let executor = ReplayExecutor::from_path(&path, 4096).unwrap();
    assert_eq!(executor.remaining(), 1);

    let err = ReplayExecutor::from_path(&path, 8).unwrap_err();
    assert!(err.to_string().contains("size limit"));

    fs::write(&path, b"{}").unwrap();
    assert!(matches!(ReplayExecutor::from_path(&path, 4096), Err(ExecutorError::Report(_))));
}

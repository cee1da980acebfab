// crates/capacity-search-executors/tests/command.rs
// ============================================================================
// Module: Command Executor Tests
// Description: Tests spawning real shell processes as workload generators.
// ============================================================================
//! ## Overview
//! Uses `sh -c` scripts that print canned reports to exercise placeholder
//! expansion, exit status handling, size limits, and the hard deadline.

#![cfg(unix)]
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
use std::time::Duration;
use std::time::Instant;

use capacity_search_core::ExecutorError;
use capacity_search_core::IterationExecutor;
use capacity_search_core::IterationRequest;
use capacity_search_core::LoadLevel;
use capacity_search_core::LoadMode;
use capacity_search_executors::CommandExecutor;
use capacity_search_executors::CommandSpec;
use capacity_search_executors::expand_placeholders;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a shell executor running `script` with the given extra args.
fn shell(script: &str, extra: &[&str], timeout: Duration) -> CommandExecutor {
    let mut args = vec!["-c".to_string(), script.to_string(), "loadgen".to_string()];
    args.extend(extra.iter().map(|arg| (*arg).to_string()));
    CommandExecutor::new(CommandSpec {
        program: "sh".to_string(),
        args,
        working_dir: None,
        timeout,
        max_report_bytes: 64 * 1024,
    })
}

/// Builds a request at 42 rps.
fn request(params: &BTreeMap<String, String>) -> IterationRequest<'_> {
    IterationRequest {
        iteration: 3,
        load: LoadLevel::from_raw(42).unwrap(),
        duration: Duration::from_secs(7),
        mode: LoadMode::Update,
        extra_params: params,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Tests every placeholder expands from the request.
#[test]
fn test_placeholders_expand() {
    let mut params = BTreeMap::new();
    params.insert("payload_size".to_string(), "1024".to_string());
    let req = request(&params);
    assert_eq!(
        expand_placeholders("--rps={rps} -d {duration_secs} {mode}#{iteration}", &req),
        "--rps=42 -d 7 update#3"
    );
    assert_eq!(expand_placeholders("{param.payload_size}", &req), "1024");
    assert_eq!(expand_placeholders("{param.absent}", &req), "{param.absent}");
}

/// Tests substituted parameter values are passed through without re-expansion.
#[test]
fn test_param_values_are_not_expanded_again() {
    let mut params = BTreeMap::new();
    params.insert("label".to_string(), "{rps}".to_string());
    params.insert("tag".to_string(), "{param.label}-{mode}".to_string());
    let req = request(&params);
    assert_eq!(expand_placeholders("{param.label}", &req), "{rps}");
    assert_eq!(expand_placeholders("{param.tag}@{rps}", &req), "{param.label}-{mode}@42");
}

/// Tests stray and malformed braces are kept as literal text.
#[test]
fn test_malformed_placeholders_are_literal() {
    let params = BTreeMap::new();
    let req = request(&params);
    assert_eq!(expand_placeholders("{}{x{rps}}", &req), "{}{x42}");
    assert_eq!(expand_placeholders("rate={rps", &req), "rate={rps");
}

/// Tests an out-of-range timeout fails the iteration instead of panicking.
#[test]
fn test_unrepresentable_timeout_fails() {
    let params = BTreeMap::new();
    let mut executor = shell("exit 0", &[], Duration::MAX);
    let err = executor.run(&request(&params)).unwrap_err();
    assert!(matches!(err, ExecutorError::Workload(_)));
    assert!(err.to_string().contains("out of range"));
}

/// Tests a generator report becomes the iteration summary.
#[test]
fn test_generator_report_is_parsed() {
    let params = BTreeMap::new();
    let mut executor = shell(
        r#"printf '{"failure_rate":0.0,"median_latency_ms":%s,"successful_requests":%s,"elapsed_secs":2.0}' "$1" "$2""#,
        &["{iteration}", "{rps}"],
        Duration::from_secs(30),
    );
    let summary = executor.run(&request(&params)).unwrap();
    assert!((summary.median_latency_ms - 3.0).abs() < f64::EPSILON);
    assert_eq!(summary.successful_requests, 42);
    assert!((summary.elapsed_secs - 2.0).abs() < f64::EPSILON);
}

/// Tests the measured wall-clock is used when the report omits it.
#[test]
fn test_measured_elapsed_fallback() {
    let params = BTreeMap::new();
    let mut executor = shell(
        r#"printf '{"failure_rate":0.0,"median_latency_ms":1.0,"successful_requests":1}'"#,
        &[],
        Duration::from_secs(30),
    );
    let summary = executor.run(&request(&params)).unwrap();
    assert!(summary.elapsed_secs > 0.0);
    assert!(summary.elapsed_secs < 30.0);
}

/// Tests non-zero exits are workload failures.
#[test]
fn test_nonzero_exit_fails() {
    let params = BTreeMap::new();
    let mut executor = shell("exit 3", &[], Duration::from_secs(30));
    let err = executor.run(&request(&params)).unwrap_err();
    assert!(matches!(err, ExecutorError::Workload(_)));
}

/// Tests malformed output is a report failure.
#[test]
fn test_malformed_output_fails() {
    let params = BTreeMap::new();
    let mut executor = shell("echo hello", &[], Duration::from_secs(30));
    let err = executor.run(&request(&params)).unwrap_err();
    assert!(matches!(err, ExecutorError::Report(_)));
}

/// Tests oversized output is rejected.
#[test]
fn test_oversized_output_fails() {
    let params = BTreeMap::new();
    let mut executor = CommandExecutor::new(CommandSpec {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "head -c 4096 /dev/zero".to_string()],
        working_dir: None,
        timeout: Duration::from_secs(30),
        max_report_bytes: 128,
    });
    let err = executor.run(&request(&params)).unwrap_err();
    assert!(err.to_string().contains("size limit"));
}

/// Tests generators exceeding the deadline are killed.
#[test]
fn test_deadline_kills_generator() {
    let params = BTreeMap::new();
    let mut executor = shell("exec sleep 30", &[], Duration::from_millis(300));
    let started = Instant::now();
    let err = executor.run(&request(&params)).unwrap_err();
    assert!(err.to_string().contains("timeout"));
    assert!(started.elapsed() < Duration::from_secs(10));
}

/// Tests the working directory is applied.
#[test]
fn test_working_dir_is_applied() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("report.json"),
        br#"{"failure_rate":0.25,"median_latency_ms":8.0,"successful_requests":3,"elapsed_secs":1.0}"#,
    )
    .unwrap();
    let params = BTreeMap::new();
    let mut executor = CommandExecutor::new(CommandSpec {
        program: "cat".to_string(),
        args: vec!["report.json".to_string()],
        working_dir: Some(dir.path().to_path_buf()),
        timeout: Duration::from_secs(30),
        max_report_bytes: 4096,
    });
    let summary = executor.run(&request(&params)).unwrap();
    assert!((summary.failure_rate - 0.25).abs() < f64::EPSILON);
}

/// Tests a missing program is a workload failure.
#[test]
fn test_missing_program_fails() {
    let params = BTreeMap::new();
    let mut executor = CommandExecutor::new(CommandSpec {
        program: "/nonexistent/loadgen".to_string(),
        args: Vec::new(),
        working_dir: None,
        timeout: Duration::from_secs(1),
        max_report_bytes: 1024,
    });
    assert!(matches!(executor.run(&request(&params)), Err(ExecutorError::Workload(_))));
}

// crates/capacity-search-broker/tests/sinks.rs
// ============================================================================
// Module: Result and Audit Sink Tests
// Description: Tests for publication delivery and audit line output.
// Dependencies: capacity-search-broker, capacity-search-core, tempfile, tiny_http
// ============================================================================
//! ## Overview
//! Delivers publications through file, log, and HTTP sinks (the latter against
//! a local `tiny_http` server) and checks audit sinks stamp JSON lines.

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

use std::fs;
use std::time::Duration;

use capacity_search_broker::FileAuditSink;
use capacity_search_broker::FileResultSink;
use capacity_search_broker::HttpResultSink;
use capacity_search_broker::LogResultSink;
use capacity_search_core::CapacityPublication;
use capacity_search_core::LoadLevel;
use capacity_search_core::LoadMode;
use capacity_search_core::PublishError;
use capacity_search_core::ResultSink;
use capacity_search_core::SearchAuditEvent;
use capacity_search_core::SearchAuditSink;
use capacity_search_core::Timestamp;
use serde_json::Value;
use tempfile::tempdir;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a sample publication.
fn publication() -> CapacityPublication {
    CapacityPublication {
        experiment_name: "max_capacity_large_memory".to_string(),
        mode_label: "Query".to_string(),
        version_id_a: "abc".to_string(),
        version_id_b: "def".to_string(),
        is_ci: true,
        capacity_rps: 412.5,
        output_dir: "capacity-search-out".to_string(),
        start_time: Timestamp::UnixMillis(1_700_000_000_000),
    }
}

// ============================================================================
// SECTION: Result Sinks
// ============================================================================

/// Tests the file sink appends one line per publication.
#[test]
fn test_file_sink_appends_lines() {
    let dir = tempdir().unwrap();
    let sink = FileResultSink::new(dir.path().join("nested").join("results.jsonl"));
    sink.publish_capacity(&publication()).unwrap();
    sink.publish_capacity(&publication()).unwrap();

    let content = fs::read_to_string(sink.path()).unwrap();
    let parsed: Vec<CapacityPublication> =
        content.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(parsed, vec![publication(), publication()]);
}

/// Tests the log sink writes the publication as JSON.
#[test]
fn test_log_sink_writes_json() {
    let sink = LogResultSink::new(Vec::new());
    sink.publish_capacity(&publication()).unwrap();
    let bytes = sink.into_inner().unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["capacity_rps"], 412.5);
    assert_eq!(value["mode_label"], "Query");
}

/// Tests the HTTP sink POSTs the publication body.
#[test]
fn test_http_sink_posts_publication() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let handle = std::thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let method = request.method().to_string();
        let mut body = String::new();
        request.as_reader().read_to_string(&mut body).unwrap();
        request.respond(Response::empty(204)).unwrap();
        (method, body)
    });

    let sink = HttpResultSink::new(&format!("http://{addr}/capacity"), Duration::from_secs(5)).unwrap();
    sink.publish_capacity(&publication()).unwrap();

    let (method, body) = handle.join().unwrap();
    assert_eq!(method, "POST");
    let received: CapacityPublication = serde_json::from_str(&body).unwrap();
    assert_eq!(received, publication());
}

/// Tests non-success statuses fail closed.
#[test]
fn test_http_sink_rejects_error_status() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let handle = std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            request.respond(Response::empty(503)).unwrap();
        }
    });

    let sink = HttpResultSink::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    let err = sink.publish_capacity(&publication()).unwrap_err();
    assert!(matches!(err, PublishError::Backend(ref message) if message.contains("503")));
    handle.join().unwrap();
}

/// Tests redirects are not followed.
#[test]
fn test_http_sink_does_not_follow_redirects() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let handle = std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = Response::empty(302).with_header(
                tiny_http::Header::from_bytes("Location", "http://127.0.0.1:1/elsewhere").unwrap(),
            );
            request.respond(response).unwrap();
        }
    });

    let sink = HttpResultSink::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    assert!(sink.publish_capacity(&publication()).is_err());
    handle.join().unwrap();
}

/// Tests unsupported URL schemes are rejected up front.
#[test]
fn test_http_sink_rejects_non_http_urls() {
    assert!(HttpResultSink::new("ftp://example.com", Duration::from_secs(1)).is_err());
    assert!(HttpResultSink::new("not a url", Duration::from_secs(1)).is_err());
}

// ============================================================================
// SECTION: Audit Sinks
// ============================================================================

/// Tests the file audit sink appends stamped JSON lines.
#[test]
fn test_file_audit_sink_stamps_events() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("audit").join("audit.jsonl");
    let sink = FileAuditSink::new(&path).unwrap();

    let mut event = SearchAuditEvent::new("iteration_completed", "run", LoadMode::Update);
    event.iteration = Some(2);
    event.load_rps = LoadLevel::from_raw(25);
    sink.record(&event);
    sink.record(&SearchAuditEvent::new("search_completed", "run", LoadMode::Update));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<Value> = content.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "iteration_completed");
    assert_eq!(lines[0]["iteration"], 2);
    assert_eq!(lines[0]["load_rps"], 25);
    assert_eq!(lines[0]["mode"], "update");
    assert!(lines[0]["timestamp_ms"].as_u64().unwrap() > 0);
    assert!(lines[1].get("iteration").is_none());
}

// crates/capacity-search-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Tests for file loading guards and fail-closed validation.
// Purpose: Ensure malformed or unsafe configuration never reaches the engine.
// ============================================================================

//! ## Overview
//! Exercises size and encoding guards, unknown-field rejection, threshold
//! ordering, and sink validation through real files on disk.

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
use std::path::PathBuf;
use std::time::Duration;

use capacity_search_config::AuditConfig;
use capacity_search_config::CapacitySearchConfig;
use capacity_search_config::ConfigError;
use capacity_search_config::ExecutorConfig;
use capacity_search_config::PublishSinkConfig;
use capacity_search_core::LoadMode;
use capacity_search_core::ReporterFailurePolicy;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes a config file into a temp directory and returns its path.
fn write_config(dir: &TempDir, content: &[u8]) -> PathBuf {
    let path = dir.path().join("capacity-search.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Asserts that parsing fails with an invalid-config message fragment.
fn assert_invalid(content: &str, fragment: &str) {
    match CapacitySearchConfig::from_toml_str(content) {
        Err(ConfigError::Invalid(message)) => {
            assert!(message.contains(fragment), "message `{message}` missing `{fragment}`");
        }
        other => panic!("expected invalid config, got {other:?}"),
    }
}

// ============================================================================
// SECTION: File Guards
// ============================================================================

/// Tests a complete config file loads and resolves every section.
#[test]
fn test_full_config_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        br#"
[search]
preset = "system_baseline"
mode = "update"
run_name = "nightly"
iteration_duration_secs = 60
on_snapshot_failure = "continue"

[search.params]
payload_size = "1024"

[update]
max_rps = 1200

[executor]
type = "command"
program = "loadgen"
args = ["--rps", "{rps}", "--duration", "{duration_secs}"]

[report]
output_dir = "out"
snapshot_log = "out/snapshots.jsonl"

[publish]
is_ci = true
version_id_a = "abc123"

[publish.sink]
type = "http"
url = "http://127.0.0.1:9200/capacity"

[audit]
type = "file"
path = "out/audit.jsonl"
"#,
    );

    let config = CapacitySearchConfig::load(Some(&path)).unwrap();

    assert_eq!(config.mode(), LoadMode::Update);
    assert_eq!(config.run_name(), "nightly");
    assert_eq!(config.experiment_name(), "max_capacity_system_baseline");
    assert_eq!(config.iteration_duration(), Duration::from_secs(60));
    assert!(matches!(config.executor, Some(ExecutorConfig::Command(_))));
    assert!(matches!(config.publish.sink, PublishSinkConfig::Http { .. }));
    assert!(matches!(config.audit, AuditConfig::File { .. }));
    assert_eq!(config.publish.version_id_b(), "abc123");

    let search = config.to_search_config(None).unwrap();
    assert_eq!(search.mode, LoadMode::Update);
    assert_eq!(search.plan.max_rps, 1200);
    assert_eq!(search.plan.initial_rps, 100);
    assert_eq!(search.on_snapshot_failure, ReporterFailurePolicy::Continue);
    assert_eq!(search.extra_params.get("payload_size").map(String::as_str), Some("1024"));
}

/// Tests an empty file yields the large-memory query defaults.
#[test]
fn test_empty_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, b"");
    let config = CapacitySearchConfig::load(Some(&path)).unwrap();
    let search = config.to_search_config(None).unwrap();
    assert_eq!(search.run_name, "run_large_memory_experiment");
    assert_eq!(search.mode, LoadMode::Query);
    assert_eq!(search.iteration_duration, Duration::from_secs(300));
    assert_eq!(search.axis_label, "requests / s");
    assert!(config.executor.is_none());
    assert!(matches!(config.audit, AuditConfig::Stderr));
}

/// Tests a missing file is an I/O error.
#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = CapacitySearchConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

/// Tests files over the size limit are rejected.
#[test]
fn test_oversized_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut content = b"# ".to_vec();
    content.extend(std::iter::repeat_n(b'x', 1024 * 1024));
    let path = write_config(&dir, &content);
    let err = CapacitySearchConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("size limit"));
}

/// Tests non-UTF-8 files are rejected.
#[test]
fn test_non_utf8_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &[0xff, 0xfe, 0x00]);
    let err = CapacitySearchConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("utf-8"));
}

/// Tests unknown fields are rejected.
#[test]
fn test_unknown_fields_are_rejected() {
    let result = CapacitySearchConfig::from_toml_str("[search]\nspeed = 3\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
    let result = CapacitySearchConfig::from_toml_str("[surprise]\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

/// Tests misspelled command executor keys are rejected.
#[test]
fn test_command_executor_unknown_fields_are_rejected() {
    let result = CapacitySearchConfig::from_toml_str(
        "[executor]\ntype = \"command\"\nprogram = \"gen\"\ntimeout_sec = 30\n",
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

// ============================================================================
// SECTION: Semantic Validation
// ============================================================================

/// Tests stop thresholds below allowable thresholds are rejected.
#[test]
fn test_misordered_thresholds_are_rejected() {
    assert_invalid("[query]\nstop_failure_rate = 0.1\n", "stop thresholds");
    assert_invalid("[update]\nstop_median_latency_ms = 100.0\n", "stop thresholds");
}

/// Tests failure rates outside [0, 1] are rejected.
#[test]
fn test_failure_rate_range_is_enforced() {
    assert_invalid("[query]\nallowable_failure_rate = 1.5\n", "allowable_failure_rate");
    assert_invalid("[query]\nstop_failure_rate = -0.5\n", "stop_failure_rate");
}

/// Tests invalid datapoint overrides are rejected.
#[test]
fn test_invalid_datapoint_overrides_are_rejected() {
    assert_invalid("[query]\nincrement_rps = 0\n", "query datapoints");
    assert_invalid("[update]\ngrowth_factor = 0.5\n", "update datapoints");
}

/// Tests run-level settings are validated.
#[test]
fn test_search_section_is_validated() {
    assert_invalid("[search]\nrun_name = \"  \"\n", "search.run_name");
    assert_invalid("[search]\niteration_duration_secs = 0\n", "iteration_duration_secs");
    assert_invalid("[search]\naxis_label = \"\"\n", "search.axis_label");
}

/// Tests executor and sink sections are validated.
#[test]
fn test_collaborator_sections_are_validated() {
    assert_invalid("[executor]\ntype = \"command\"\nprogram = \"\"\n", "executor.program");
    assert_invalid("[executor]\ntype = \"command\"\nprogram = \"x\"\ntimeout_secs = 0\n", "timeout_secs");
    assert_invalid("[publish.sink]\ntype = \"http\"\nurl = \"ftp://host\"\n", "http or https");
    assert_invalid("[publish.sink]\ntype = \"file\"\npath = \"\"\n", "publish.sink.path");
    assert_invalid("[audit]\ntype = \"file\"\npath = \" \"\n", "audit.path");
}

/// Tests explicit command timeouts are bounded above.
#[test]
fn test_command_timeout_is_capped() {
    assert_invalid(
        "[executor]\ntype = \"command\"\nprogram = \"x\"\ntimeout_secs = 9223372036854775807\n",
        "timeout_secs",
    );
    assert_invalid(
        "[executor]\ntype = \"command\"\nprogram = \"x\"\ntimeout_secs = 86521\n",
        "timeout_secs",
    );
    let config = CapacitySearchConfig::from_toml_str(
        "[executor]\ntype = \"command\"\nprogram = \"x\"\ntimeout_secs = 86520\n",
    )
    .unwrap();
    let Some(ExecutorConfig::Command(command)) = config.executor else {
        panic!("expected command executor");
    };
    assert_eq!(command.timeout(Duration::from_secs(1)), Duration::from_secs(86_520));
}

/// Tests the CLI mode override wins over the file mode.
#[test]
fn test_mode_override_selects_profile() {
    let config = CapacitySearchConfig::from_toml_str("[search]\nmode = \"query\"\n").unwrap();
    let search = config.to_search_config(Some(LoadMode::Update)).unwrap();
    assert_eq!(search.mode, LoadMode::Update);
    assert_eq!(search.plan.target_rps, 25);
}

// crates/capacity-search-cli/src/tests/exit.rs
// ============================================================================
// Module: CLI Exit Code Tests
// Description: Unit tests for failure classification.
// Dependencies: capacity-search-cli exit module, capacity-search-core
// ============================================================================

//! ## Overview
//! Pins the exit code assigned to every engine error family.

use capacity_search_core::ConfigurationError;
use capacity_search_core::ExecutorError;
use capacity_search_core::LoadLevel;
use capacity_search_core::ReportError;
use capacity_search_core::SearchError;
use capacity_search_core::SearchStatus;
use capacity_search_core::StopReason;
use capacity_search_core::SummaryError;

use crate::exit::FailureKind;

#[test]
fn codes_are_stable() {
    assert_eq!(FailureKind::Other.code(), 1);
    assert_eq!(FailureKind::Config.code(), 2);
    assert_eq!(FailureKind::Executor.code(), 3);
    assert_eq!(FailureKind::Report.code(), 4);
}

#[test]
fn search_errors_map_to_their_family() {
    let load = LoadLevel::from_raw(10).unwrap();
    let cases = [
        (SearchError::InvalidConfiguration(ConfigurationError::EmptyRunName), FailureKind::Config),
        (
            SearchError::Executor {
                load,
                source: ExecutorError::Workload("down".to_string()),
            },
            FailureKind::Executor,
        ),
        (
            SearchError::InvalidSummary {
                load,
                source: SummaryError::FailureRate(2.0),
            },
            FailureKind::Executor,
        ),
        (SearchError::Snapshot(ReportError::Io("disk".to_string())), FailureKind::Report),
        (SearchError::FinalSnapshot(ReportError::Io("disk".to_string())), FailureKind::Report),
        (
            SearchError::NotRunning(SearchStatus::Done(StopReason::Exhausted)),
            FailureKind::Other,
        ),
    ];
    for (error, expected) in cases {
        assert_eq!(FailureKind::from_search_error(&error), expected, "{error}");
    }
}

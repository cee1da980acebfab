// crates/capacity-search-executors/src/replay.rs
// ============================================================================
// Module: Replay Executor
// Description: Serves recorded workload reports in order.
// Purpose: Deterministic dry runs and regression fixtures without a target.
// Dependencies: capacity-search-core, crate::report, serde_json
// ============================================================================

//! ## Overview
//! [`ReplayExecutor`] answers each iteration with the next recorded
//! [`WorkloadReport`]. Running out of reports is an executor failure, so a
//! replay never fabricates measurements.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::path::Path;

use capacity_search_core::ExecutorError;
use capacity_search_core::IterationExecutor;
use capacity_search_core::IterationRequest;
use capacity_search_core::IterationSummary;

use crate::report::WorkloadReport;
use crate::report::read_file_limited;

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Executor replaying recorded reports.
#[derive(Debug, Clone, Default)]
pub struct ReplayExecutor {
    /// Reports not yet served.
    pending: VecDeque<WorkloadReport>,
}

impl ReplayExecutor {
    /// Creates a replay executor over in-memory reports.
    #[must_use]
    pub fn from_reports(reports: Vec<WorkloadReport>) -> Self {
        Self {
            pending: reports.into(),
        }
    }

    /// Loads a JSON array of reports from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Report`] when the file is unreadable, too
    /// large, or not an array of reports.
    pub fn from_path(path: &Path, max_bytes: usize) -> Result<Self, ExecutorError> {
        let bytes = read_file_limited(path, max_bytes)?;
        let reports: Vec<WorkloadReport> = serde_json::from_slice(&bytes).map_err(|err| {
            ExecutorError::Report(format!("invalid replay file {}: {err}", path.display()))
        })?;
        Ok(Self::from_reports(reports))
    }

    /// Returns the number of reports not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl IterationExecutor for ReplayExecutor {
    fn run(&mut self, request: &IterationRequest<'_>) -> Result<IterationSummary, ExecutorError> {
        let report =
            self.pending.pop_front().ok_or(ExecutorError::Exhausted(request.iteration))?;
        report.into_summary(request.duration.as_secs_f64())
    }
}

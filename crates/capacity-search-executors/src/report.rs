// crates/capacity-search-executors/src/report.rs
// ============================================================================
// Module: Workload Reports
// Description: JSON report format emitted by workload generators.
// Purpose: Convert raw generator output into validated iteration summaries.
// Dependencies: capacity-search-core, serde, serde_json
// ============================================================================

//! ## Overview
//! A workload generator reports one JSON object per iteration. Generators that
//! drive several targets report one median per target in
//! `median_latencies_ms`; the slowest target's median is the iteration median.
//! When the report omits `elapsed_secs`, the executor's measured wall-clock
//! duration is used.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use capacity_search_core::ExecutorError;
use capacity_search_core::IterationSummary;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Report
// ============================================================================

/// Raw per-iteration report produced by a workload generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadReport {
    /// Fraction of failed requests.
    pub failure_rate: f64,
    /// Single median latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_latency_ms: Option<f64>,
    /// Per-target median latencies in milliseconds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub median_latencies_ms: Vec<f64>,
    /// Successful request count.
    pub successful_requests: u64,
    /// Total issued requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u64>,
    /// Generator-measured duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<f64>,
    /// Mean latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_latency_ms: Option<f64>,
    /// Fastest latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_latency_ms: Option<f64>,
    /// Slowest latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_latency_ms: Option<f64>,
}

impl WorkloadReport {
    /// Returns the iteration median: the largest reported median.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.median_latencies_ms
            .iter()
            .copied()
            .chain(self.median_latency_ms)
            .reduce(f64::max)
    }

    /// Converts the report into a summary.
    ///
    /// `measured_elapsed_secs` is used when the report carries no duration.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Report`] when no median latency is reported.
    pub fn into_summary(self, measured_elapsed_secs: f64) -> Result<IterationSummary, ExecutorError> {
        let median = self
            .median()
            .ok_or_else(|| ExecutorError::Report("report carries no median latency".to_string()))?;
        Ok(IterationSummary {
            failure_rate: self.failure_rate,
            median_latency_ms: median,
            successful_requests: self.successful_requests,
            elapsed_secs: self.elapsed_secs.unwrap_or(measured_elapsed_secs),
            total_requests: self.total_requests,
            average_latency_ms: self.average_latency_ms,
            min_latency_ms: self.min_latency_ms,
            max_latency_ms: self.max_latency_ms,
        })
    }
}

/// Parses a single report from generator output.
///
/// # Errors
///
/// Returns [`ExecutorError::Report`] when the bytes are not a valid report.
pub fn parse_report(bytes: &[u8]) -> Result<WorkloadReport, ExecutorError> {
    serde_json::from_slice(bytes).map_err(|err| ExecutorError::Report(err.to_string()))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a file while enforcing a maximum byte limit.
pub(crate) fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ExecutorError> {
    let file = File::open(path)
        .map_err(|err| ExecutorError::Report(format!("unable to open {}: {err}", path.display())))?;
    read_limited(file, max_bytes)
}

/// Reads a stream while enforcing a maximum byte limit.
pub(crate) fn read_limited<R: Read>(reader: R, max_bytes: usize) -> Result<Vec<u8>, ExecutorError> {
    let limit = u64::try_from(max_bytes.saturating_add(1))
        .map_err(|_| ExecutorError::Report("report size limit exceeds u64".to_string()))?;
    let mut buf = Vec::new();
    reader
        .take(limit)
        .read_to_end(&mut buf)
        .map_err(|err| ExecutorError::Report(format!("unable to read report: {err}")))?;
    if buf.len() > max_bytes {
        return Err(ExecutorError::Report(format!("report exceeds size limit of {max_bytes} bytes")));
    }
    Ok(buf)
}

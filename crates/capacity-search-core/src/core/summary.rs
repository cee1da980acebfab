// crates/capacity-search-core/src/core/summary.rs
// ============================================================================
// Module: Capacity Search Iteration Summary
// Description: Measurement summary produced by one executor invocation.
// Purpose: Replace positional measurement tuples with named, unit-bearing fields.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! An [`IterationSummary`] is what an executor reports for one load level:
//! failure rate, latency statistics in milliseconds, request counts, and the
//! measured wall-clock duration. The engine consumes summaries as untrusted
//! input and validates the numeric domain before evaluating thresholds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Iteration Summary
// ============================================================================

/// Measurement summary for a single iteration.
///
/// # Invariants
/// - `failure_rate` lies in `[0.0, 1.0]`.
/// - Latencies are finite and non-negative milliseconds.
/// - `elapsed_secs` is finite and strictly positive.
/// - `successful_requests <= total_requests` when the total is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationSummary {
    /// Fraction of issued requests that did not complete successfully.
    pub failure_rate: f64,
    /// Median request latency in milliseconds.
    pub median_latency_ms: f64,
    /// Number of requests that completed successfully.
    pub successful_requests: u64,
    /// Measured iteration duration in seconds.
    pub elapsed_secs: f64,
    /// Total requests issued, when the executor reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u64>,
    /// Mean request latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_latency_ms: Option<f64>,
    /// Fastest observed request latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_latency_ms: Option<f64>,
    /// Slowest observed request latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_latency_ms: Option<f64>,
}

impl IterationSummary {
    /// Creates a summary with the required fields and no optional statistics.
    #[must_use]
    pub const fn new(
        failure_rate: f64,
        median_latency_ms: f64,
        successful_requests: u64,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            failure_rate,
            median_latency_ms,
            successful_requests,
            elapsed_secs,
            total_requests: None,
            average_latency_ms: None,
            min_latency_ms: None,
            max_latency_ms: None,
        }
    }

    /// Returns the achieved throughput (successful completions per second).
    ///
    /// Only meaningful for summaries that passed [`IterationSummary::validate`].
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Request counts far below 2^52 are represented exactly."
    )]
    pub fn achieved_rps(&self) -> f64 {
        self.successful_requests as f64 / self.elapsed_secs
    }

    /// Validates the numeric domain of the summary.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] when any field is outside its documented range.
    pub fn validate(&self) -> Result<(), SummaryError> {
        if !self.failure_rate.is_finite() || !(0.0 ..= 1.0).contains(&self.failure_rate) {
            return Err(SummaryError::FailureRate(self.failure_rate));
        }
        check_latency("median_latency_ms", self.median_latency_ms)?;
        for (field, value) in [
            ("average_latency_ms", self.average_latency_ms),
            ("min_latency_ms", self.min_latency_ms),
            ("max_latency_ms", self.max_latency_ms),
        ] {
            if let Some(value) = value {
                check_latency(field, value)?;
            }
        }
        if !self.elapsed_secs.is_finite() || self.elapsed_secs <= 0.0 {
            return Err(SummaryError::Elapsed(self.elapsed_secs));
        }
        if let Some(total) = self.total_requests
            && self.successful_requests > total
        {
            return Err(SummaryError::SuccessExceedsTotal {
                successful: self.successful_requests,
                total,
            });
        }
        Ok(())
    }
}

/// Checks that a latency value is finite and non-negative.
fn check_latency(field: &'static str, value: f64) -> Result<(), SummaryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SummaryError::Latency {
            field,
            value,
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation failures for executor-provided summaries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummaryError {
    /// Failure rate is outside `[0, 1]`.
    #[error("failure rate {0} is outside [0, 1]")]
    FailureRate(f64),
    /// Latency is negative or non-finite.
    #[error("{field} {value} must be a finite, non-negative number of milliseconds")]
    Latency {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Elapsed duration is not strictly positive.
    #[error("elapsed duration {0}s must be greater than zero")]
    Elapsed(f64),
    /// More successes than issued requests.
    #[error("successful requests {successful} exceed total requests {total}")]
    SuccessExceedsTotal {
        /// Reported successful requests.
        successful: u64,
        /// Reported total requests.
        total: u64,
    },
}

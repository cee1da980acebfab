// crates/capacity-search-core/src/runtime/thresholds.rs
// ============================================================================
// Module: Threshold Evaluator
// Description: Pure pass/fail classification of iteration summaries.
// Purpose: Decide whether an iteration counts toward capacity or ends the search.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Evaluation is a pure function of a summary and a threshold pair set. Query
//! and update searches share the evaluator and differ only in the thresholds
//! passed in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::IterationSummary;
use crate::core::Thresholds;
use crate::core::Verdict;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Classifies a summary against allowable and stop thresholds.
///
/// `acceptable` requires both metrics strictly below the allowable limits;
/// `must_stop` fires when either metric meets or exceeds its stop limit.
#[must_use]
pub fn evaluate(summary: &IterationSummary, thresholds: &Thresholds) -> Verdict {
    let acceptable = summary.failure_rate < thresholds.allowable.failure_rate
        && summary.median_latency_ms < thresholds.allowable.median_latency_ms;
    let must_stop = summary.failure_rate >= thresholds.stop.failure_rate
        || summary.median_latency_ms >= thresholds.stop.median_latency_ms;
    Verdict {
        acceptable,
        must_stop,
    }
}

/// Threshold evaluator bound to one mode's thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEvaluator {
    /// Thresholds applied to every summary.
    thresholds: Thresholds,
}

impl ThresholdEvaluator {
    /// Creates an evaluator for the given thresholds.
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
        }
    }

    /// Returns the bound thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classifies a summary.
    #[must_use]
    pub fn evaluate(&self, summary: &IterationSummary) -> Verdict {
        evaluate(summary, &self.thresholds)
    }
}

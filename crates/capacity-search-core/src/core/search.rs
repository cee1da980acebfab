// crates/capacity-search-core/src/core/search.rs
// ============================================================================
// Module: Capacity Search Configuration
// Description: Immutable configuration consumed by the search engine.
// Purpose: Replace process-wide flags with an explicit value passed at construction.
// Dependencies: crate::core::{datapoints, load, thresholds}, serde, thiserror
// ============================================================================

//! ## Overview
//! [`SearchConfig`] carries everything one run needs: the datapoint plan, the
//! threshold tiers of the selected mode, the iteration duration, reporter
//! naming, and the reporter failure policy. Query and update runs differ only
//! in the values stored here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::datapoints::DatapointError;
use crate::core::datapoints::DatapointPlan;
use crate::core::load::LoadMode;
use crate::core::thresholds::Thresholds;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default axis label for snapshot charts.
pub const DEFAULT_AXIS_LABEL: &str = "requests / s";

// ============================================================================
// SECTION: Reporter Failure Policy
// ============================================================================

/// Behavior when a non-final snapshot cannot be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterFailurePolicy {
    /// Abort the search with an error.
    #[default]
    Abort,
    /// Audit the failure and keep measuring.
    Continue,
}

// ============================================================================
// SECTION: Search Configuration
// ============================================================================

/// Configuration for one capacity search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Run name used as the snapshot key.
    pub run_name: String,
    /// Measurement mode.
    pub mode: LoadMode,
    /// Label of the load axis in snapshots.
    pub axis_label: String,
    /// Workload duration requested per iteration.
    pub iteration_duration: Duration,
    /// Datapoint generator parameters.
    pub plan: DatapointPlan,
    /// Threshold tiers for the mode.
    pub thresholds: Thresholds,
    /// Extra parameters forwarded verbatim to the executor.
    pub extra_params: BTreeMap<String, String>,
    /// Behavior on non-final snapshot failures.
    pub on_snapshot_failure: ReporterFailurePolicy,
}

impl SearchConfig {
    /// Validates engine-level invariants.
    ///
    /// Threshold ordering is a caller responsibility and is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the configuration cannot drive a search.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.run_name.trim().is_empty() {
            return Err(ConfigurationError::EmptyRunName);
        }
        if self.iteration_duration.is_zero() {
            return Err(ConfigurationError::ZeroDuration);
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors raised before the first iteration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Datapoint generation or validation failed.
    #[error(transparent)]
    Datapoints(#[from] DatapointError),
    /// Iteration duration is zero.
    #[error("iteration duration must be greater than zero")]
    ZeroDuration,
    /// Run name is empty.
    #[error("run name must be non-empty")]
    EmptyRunName,
}

// crates/capacity-search-core/src/core/datapoints.rs
// ============================================================================
// Module: Capacity Search Datapoints
// Description: Load sequence plan and validated datapoint sequences.
// Purpose: Guarantee the engine only ever walks a finite, increasing sequence.
// Dependencies: crate::core::load, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`DatapointPlan`] describes how probe points are generated; a
//! [`DatapointSequence`] is the materialized result. Sequences are computed
//! once, before the first iteration, and are immutable afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::load::LoadLevel;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of datapoints a single search may probe.
pub const MAX_DATAPOINTS: usize = 10_000;

// ============================================================================
// SECTION: Datapoint Plan
// ============================================================================

/// Parameters of the datapoint generator, in requests per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatapointPlan {
    /// Load level of primary interest.
    pub target_rps: u64,
    /// First probe value.
    pub initial_rps: u64,
    /// Upper bound of the sequence.
    pub max_rps: u64,
    /// Base step between probe values.
    pub increment_rps: u64,
    /// Multiplicative step growth applied at and beyond the target (>= 1.0).
    pub growth_factor: f64,
}

// ============================================================================
// SECTION: Datapoint Sequence
// ============================================================================

/// Validated probe sequence.
///
/// # Invariants
/// - Non-empty.
/// - Strictly increasing.
/// - At most [`MAX_DATAPOINTS`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LoadLevel>", into = "Vec<LoadLevel>")]
pub struct DatapointSequence {
    /// Probe values in order.
    levels: Vec<LoadLevel>,
}

impl DatapointSequence {
    /// Validates an explicit list of load levels.
    ///
    /// # Errors
    ///
    /// Returns [`DatapointError`] when the list is empty, too long, or not
    /// strictly increasing.
    pub fn from_levels(levels: Vec<LoadLevel>) -> Result<Self, DatapointError> {
        if levels.is_empty() {
            return Err(DatapointError::Empty);
        }
        if levels.len() > MAX_DATAPOINTS {
            return Err(DatapointError::TooMany {
                max: MAX_DATAPOINTS,
            });
        }
        if let Some(index) = levels.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(DatapointError::NotIncreasing {
                index: index + 1,
            });
        }
        Ok(Self {
            levels,
        })
    }

    /// Returns the probe values.
    #[must_use]
    pub fn levels(&self) -> &[LoadLevel] {
        &self.levels
    }

    /// Returns the probe value at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LoadLevel> {
        self.levels.get(index).copied()
    }

    /// Returns the number of probe values (always >= 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns true when the sequence has no probe values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl TryFrom<Vec<LoadLevel>> for DatapointSequence {
    type Error = DatapointError;

    fn try_from(levels: Vec<LoadLevel>) -> Result<Self, Self::Error> {
        Self::from_levels(levels)
    }
}

impl From<DatapointSequence> for Vec<LoadLevel> {
    fn from(sequence: DatapointSequence) -> Self {
        sequence.levels
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Invalid generator parameters or datapoint lists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatapointError {
    /// A rate parameter was zero.
    #[error("{0} must be greater than zero")]
    ZeroRate(&'static str),
    /// Growth factor is non-finite or below 1.0.
    #[error("growth factor {0} must be a finite number >= 1.0")]
    GrowthFactor(f64),
    /// No datapoints.
    #[error("datapoint sequence is empty")]
    Empty,
    /// Datapoints are not strictly increasing.
    #[error("datapoint {index} is not greater than its predecessor")]
    NotIncreasing {
        /// Index of the first offending datapoint.
        index: usize,
    },
    /// Sequence exceeds the datapoint limit.
    #[error("datapoint sequence exceeds {max} points")]
    TooMany {
        /// Maximum allowed datapoints.
        max: usize,
    },
}

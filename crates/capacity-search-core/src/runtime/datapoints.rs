// crates/capacity-search-core/src/runtime/datapoints.rs
// ============================================================================
// Module: Datapoint Sequence Generator
// Description: Deterministic generation of probe load levels.
// Purpose: Precompute the finite, strictly increasing sequence a search walks.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The generator advances by a fixed increment until the target load is
//! reached, then grows the step geometrically so exploratory rounds past the
//! target approach the ceiling quickly. The ceiling is always the last probe
//! once the walk reaches it.
//!
//! Security posture: plan values come from configuration files; every input is
//! validated and the output length is capped at [`MAX_DATAPOINTS`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DatapointError;
use crate::core::DatapointPlan;
use crate::core::DatapointSequence;
use crate::core::LoadLevel;
use crate::core::MAX_DATAPOINTS;

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Generates the probe sequence for a plan.
///
/// # Invariants
/// - Output is non-empty, strictly increasing, and every value lies in
///   `[initial_rps, max_rps]` (or equals `max_rps` when `initial_rps > max_rps`).
/// - The target is probed whenever it lies in `[initial_rps, max_rps]`.
///
/// # Errors
///
/// Returns [`DatapointError`] when a rate is zero, the growth factor is not a
/// finite number `>= 1.0`, or the sequence would exceed [`MAX_DATAPOINTS`].
pub fn generate_datapoints(plan: &DatapointPlan) -> Result<DatapointSequence, DatapointError> {
    let initial = nonzero(plan.initial_rps, "initial_rps")?;
    let ceiling = nonzero(plan.max_rps, "max_rps")?;
    nonzero(plan.increment_rps, "increment_rps")?;
    nonzero(plan.target_rps, "target_rps")?;
    if !plan.growth_factor.is_finite() || plan.growth_factor < 1.0 {
        return Err(DatapointError::GrowthFactor(plan.growth_factor));
    }
    if initial > ceiling {
        return DatapointSequence::from_levels(vec![ceiling]);
    }

    let mut levels = vec![initial];
    let mut current = initial.get();
    let mut growth_steps: i32 = 0;
    while current < ceiling.get() {
        let next = if current < plan.target_rps {
            current.saturating_add(plan.increment_rps).min(plan.target_rps)
        } else {
            growth_steps = growth_steps.saturating_add(1);
            current.saturating_add(grown_step(plan.increment_rps, plan.growth_factor, growth_steps))
        };
        if next >= ceiling.get() {
            levels.push(ceiling);
            break;
        }
        if levels.len() >= MAX_DATAPOINTS {
            return Err(DatapointError::TooMany {
                max: MAX_DATAPOINTS,
            });
        }
        // next > current >= 1, so the level is non-zero.
        let Some(level) = LoadLevel::from_raw(next) else {
            return Err(DatapointError::ZeroRate("datapoint"));
        };
        levels.push(level);
        current = next;
    }
    DatapointSequence::from_levels(levels)
}

/// Returns `increment * growth^k`, rounded and at least 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "Step is finite, positive, and saturates at u64::MAX on overflow."
)]
fn grown_step(increment: u64, growth_factor: f64, k: i32) -> u64 {
    let step = (increment as f64 * growth_factor.powi(k)).round();
    if step.is_finite() { (step as u64).max(1) } else { u64::MAX }
}

/// Converts a raw rate into a load level, naming the offending field on zero.
fn nonzero(value: u64, field: &'static str) -> Result<LoadLevel, DatapointError> {
    LoadLevel::from_raw(value).ok_or(DatapointError::ZeroRate(field))
}

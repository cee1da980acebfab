// crates/capacity-search-config/src/presets.rs
// ============================================================================
// Module: Capacity Search Presets
// Description: Named search profiles for the shipped experiments.
// Purpose: Provide the default sequences and thresholds per experiment and mode.
// Dependencies: capacity-search-core, serde
// ============================================================================

//! ## Overview
//! A preset bundles one datapoint plan and one threshold set per mode plus run
//! naming defaults. Configuration files select a preset and may override any
//! individual value per mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use capacity_search_core::DatapointPlan;
use capacity_search_core::LoadMode;
use capacity_search_core::ThresholdPair;
use capacity_search_core::Thresholds;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Shared Defaults
// ============================================================================

/// Default workload duration per iteration in seconds.
pub const DEFAULT_ITERATION_DURATION_SECS: u64 = 300;

/// Allowable thresholds shared by every preset.
const ALLOWABLE: ThresholdPair = ThresholdPair::new(0.2, 5_000.0);

/// Stop failure rate shared by every preset.
const STOP_FAILURE_RATE: f64 = 0.95;

// ============================================================================
// SECTION: Presets
// ============================================================================

/// Shipped experiment presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Large-memory experiment: small loads, geometric growth past the target.
    #[default]
    LargeMemory,
    /// System baseline experiment: high loads, constant step.
    SystemBaseline,
}

/// Sequence plan and thresholds for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    /// Datapoint generator parameters.
    pub plan: DatapointPlan,
    /// Threshold tiers.
    pub thresholds: Thresholds,
}

/// Full preset profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetProfile {
    /// Default run name used as the snapshot key.
    pub run_name: &'static str,
    /// Default experiment name used when publishing.
    pub experiment_name: &'static str,
    /// Default iteration duration in seconds.
    pub iteration_duration_secs: u64,
    /// Query-mode profile.
    pub query: ModeProfile,
    /// Update-mode profile.
    pub update: ModeProfile,
}

impl PresetProfile {
    /// Returns the profile for a mode.
    #[must_use]
    pub const fn mode(&self, mode: LoadMode) -> &ModeProfile {
        match mode {
            LoadMode::Query => &self.query,
            LoadMode::Update => &self.update,
        }
    }
}

impl Preset {
    /// Returns the stable preset name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LargeMemory => "large_memory",
            Self::SystemBaseline => "system_baseline",
        }
    }

    /// Returns the preset profile.
    #[must_use]
    pub const fn profile(self) -> PresetProfile {
        match self {
            Self::LargeMemory => {
                let thresholds = Thresholds {
                    allowable: ALLOWABLE,
                    stop: ThresholdPair::new(STOP_FAILURE_RATE, 25_000.0),
                };
                PresetProfile {
                    run_name: "run_large_memory_experiment",
                    experiment_name: "max_capacity_large_memory",
                    iteration_duration_secs: DEFAULT_ITERATION_DURATION_SECS,
                    query: ModeProfile {
                        plan: plan(160, 20, 1_000, 5, 1.5),
                        thresholds,
                    },
                    update: ModeProfile {
                        plan: plan(25, 10, 500, 5, 1.5),
                        thresholds,
                    },
                }
            }
            Self::SystemBaseline => {
                let thresholds = Thresholds {
                    allowable: ALLOWABLE,
                    stop: ThresholdPair::new(STOP_FAILURE_RATE, 120_000.0),
                };
                PresetProfile {
                    run_name: "run_system_baseline_experiment",
                    experiment_name: "max_capacity_system_baseline",
                    iteration_duration_secs: DEFAULT_ITERATION_DURATION_SECS,
                    query: ModeProfile {
                        plan: plan(4_000, 100, 40_000, 50, 1.0),
                        thresholds,
                    },
                    update: ModeProfile {
                        plan: plan(600, 100, 2_000, 20, 1.0),
                        thresholds,
                    },
                }
            }
        }
    }
}

/// Builds a datapoint plan from positional values.
const fn plan(target: u64, initial: u64, max: u64, increment: u64, growth: f64) -> DatapointPlan {
    DatapointPlan {
        target_rps: target,
        initial_rps: initial,
        max_rps: max,
        increment_rps: increment,
        growth_factor: growth,
    }
}

// crates/capacity-search-executors/src/lib.rs
// ============================================================================
// Module: Capacity Search Executors Library
// Description: Iteration executors backed by external tools or recordings.
// Purpose: Provide ready-made IterationExecutor implementations.
// Dependencies: capacity-search-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Executors run one iteration at a requested load and return a measurement
//! summary. [`CommandExecutor`] delegates to an external workload generator
//! that prints a JSON [`WorkloadReport`]; [`ReplayExecutor`] serves recorded
//! reports for dry runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod command;
pub mod replay;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use command::CommandExecutor;
pub use command::CommandSpec;
pub use command::expand_placeholders;
pub use replay::ReplayExecutor;
pub use report::WorkloadReport;
pub use report::parse_report;

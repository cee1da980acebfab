// crates/capacity-search-cli/src/exit.rs
// ============================================================================
// Module: CLI Exit Codes
// Description: Stable process exit codes for capacity-search failures.
// Purpose: Let scripts distinguish configuration, executor, and report failures.
// Dependencies: capacity-search-core
// ============================================================================

//! ## Overview
//! A finished search (threshold stop or exhausted datapoints) exits `0`.
//! Failures map to:
//!
//! | Code | Failure |
//! |------|---------|
//! | 1 | other errors (I/O, usage) |
//! | 2 | invalid configuration |
//! | 3 | executor failure |
//! | 4 | snapshot or report failure |

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::ExitCode;

use capacity_search_core::SearchError;

// ============================================================================
// SECTION: Failure Kinds
// ============================================================================

/// Failure classification carried by CLI errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Any failure without a dedicated code.
    Other,
    /// Configuration could not be loaded or is invalid.
    Config,
    /// The executor failed or returned an invalid summary.
    Executor,
    /// A snapshot could not be written or verified.
    Report,
}

impl FailureKind {
    /// Returns the process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Other => 1,
            Self::Config => 2,
            Self::Executor => 3,
            Self::Report => 4,
        }
    }

    /// Classifies an engine error.
    #[must_use]
    pub const fn from_search_error(error: &SearchError) -> Self {
        match error {
            SearchError::InvalidConfiguration(_) => Self::Config,
            SearchError::Executor { .. } | SearchError::InvalidSummary { .. } => Self::Executor,
            SearchError::Snapshot(_) | SearchError::FinalSnapshot(_) => Self::Report,
            SearchError::NotRunning(_) => Self::Other,
        }
    }

    /// Converts the classification into a process exit code.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

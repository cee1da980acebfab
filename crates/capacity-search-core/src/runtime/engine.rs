// crates/capacity-search-core/src/runtime/engine.rs
// ============================================================================
// Module: Capacity Search Engine
// Description: Stateful control loop driving executor, evaluator, and reporter.
// Purpose: Convert per-iteration measurements into a capacity verdict.
// Dependencies: crate::{core, interfaces, runtime}, thiserror
// ============================================================================

//! ## Overview
//! [`CapacitySearch`] walks a precomputed datapoint sequence one round at a
//! time. Each round runs exactly one executor call, classifies the summary,
//! updates the capacity record, appends to history, and reports a snapshot.
//! The engine is synchronous and single-writer: the next round never starts
//! before the previous snapshot call returns.
//!
//! Failure posture: executor errors are never retried or swallowed. They mark
//! the search failed and propagate. The in-memory state remains readable after
//! every error so callers can inspect the last consistent best record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CapacityPublication;
use crate::core::CapacityRecord;
use crate::core::ConfigurationError;
use crate::core::DatapointSequence;
use crate::core::HistoryEntry;
use crate::core::IterationSummary;
use crate::core::LoadLevel;
use crate::core::PublicationContext;
use crate::core::ReporterFailurePolicy;
use crate::core::SearchConfig;
use crate::core::SearchSnapshot;
use crate::core::SearchState;
use crate::core::SearchStatus;
use crate::core::SnapshotState;
use crate::core::StopReason;
use crate::core::SummaryError;
use crate::core::Verdict;
use crate::interfaces::ExecutorError;
use crate::interfaces::IterationExecutor;
use crate::interfaces::IterationRequest;
use crate::interfaces::PublishError;
use crate::interfaces::ReportError;
use crate::interfaces::ResultSink;
use crate::interfaces::SearchAuditEvent;
use crate::interfaces::SearchAuditSink;
use crate::interfaces::SnapshotReporter;
use crate::runtime::datapoints::generate_datapoints;
use crate::runtime::thresholds::ThresholdEvaluator;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More rounds remain.
    Continue,
    /// The search reached `done` with the given reason.
    Finished(StopReason),
}

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Best sustainable capacity.
    pub best: CapacityRecord,
    /// Why the search ended.
    pub reason: StopReason,
    /// Number of completed iterations.
    pub iterations: u64,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Capacity search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration or datapoints are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    /// Executor failed; the search is aborted.
    #[error("executor failed at {load} rps: {source}")]
    Executor {
        /// Load level of the failed round.
        load: LoadLevel,
        /// Executor error.
        source: ExecutorError,
    },
    /// Executor returned a summary outside the valid numeric domain.
    #[error("executor returned an invalid summary at {load} rps: {source}")]
    InvalidSummary {
        /// Load level of the failed round.
        load: LoadLevel,
        /// Validation error.
        source: SummaryError,
    },
    /// A non-final snapshot could not be persisted under the abort policy.
    #[error("snapshot write failed: {0}")]
    Snapshot(#[source] ReportError),
    /// The terminating snapshot could not be persisted; the run is not done.
    #[error("final snapshot write failed: {0}")]
    FinalSnapshot(#[source] ReportError),
    /// The search already ended.
    #[error("search is not running (status {})", .0.as_str())]
    NotRunning(SearchStatus),
}

impl SearchError {
    /// Returns true when the error originated in the executor.
    #[must_use]
    pub const fn is_executor_failure(&self) -> bool {
        matches!(self, Self::Executor { .. } | Self::InvalidSummary { .. })
    }

    /// Returns true when the error originated in the snapshot reporter.
    #[must_use]
    pub const fn is_report_failure(&self) -> bool {
        matches!(self, Self::Snapshot(_) | Self::FinalSnapshot(_))
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Capacity search control loop.
///
/// # Invariants
/// - `best.achieved_rps` never decreases.
/// - History grows by exactly one entry per completed round.
/// - `done` is entered only after the terminating snapshot was reported.
pub struct CapacitySearch<E, R, A> {
    /// Run configuration.
    config: SearchConfig,
    /// Precomputed probe sequence.
    datapoints: DatapointSequence,
    /// Threshold evaluator for the configured mode.
    evaluator: ThresholdEvaluator,
    /// Iteration executor.
    executor: E,
    /// Snapshot reporter.
    reporter: R,
    /// Audit sink.
    audit: A,
    /// Search state; single writer.
    state: SearchState,
}

impl<E, R, A> CapacitySearch<E, R, A>
where
    E: IterationExecutor,
    R: SnapshotReporter,
    A: SearchAuditSink,
{
    /// Creates a search over the sequence generated from the configured plan.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfiguration`] when the configuration or
    /// plan is invalid.
    pub fn new(config: SearchConfig, executor: E, reporter: R, audit: A) -> Result<Self, SearchError> {
        config.validate()?;
        let datapoints = generate_datapoints(&config.plan).map_err(ConfigurationError::from)?;
        Ok(Self::assemble(config, datapoints, executor, reporter, audit))
    }

    /// Creates a search over an explicit list of load levels.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfiguration`] when the configuration is
    /// invalid or the levels are empty or not strictly increasing.
    pub fn with_datapoints(
        config: SearchConfig,
        levels: Vec<LoadLevel>,
        executor: E,
        reporter: R,
        audit: A,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let datapoints = DatapointSequence::from_levels(levels).map_err(ConfigurationError::from)?;
        Ok(Self::assemble(config, datapoints, executor, reporter, audit))
    }

    /// Builds the engine from validated parts.
    fn assemble(
        config: SearchConfig,
        datapoints: DatapointSequence,
        executor: E,
        reporter: R,
        audit: A,
    ) -> Self {
        let state = SearchState::new(config.run_name.clone(), config.mode);
        let evaluator = ThresholdEvaluator::new(config.thresholds);
        Self {
            config,
            datapoints,
            evaluator,
            executor,
            reporter,
            audit,
            state,
        }
    }

    /// Returns the current search state.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the precomputed probe sequence.
    #[must_use]
    pub const fn datapoints(&self) -> &DatapointSequence {
        &self.datapoints
    }

    /// Runs rounds until the search finishes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on executor failure, snapshot failure, or when
    /// the search already ended.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        loop {
            if let StepOutcome::Finished(reason) = self.step()? {
                return Ok(SearchOutcome {
                    best: self.state.best,
                    reason,
                    iterations: self.state.iteration_index,
                });
            }
        }
    }

    /// Performs exactly one round.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotRunning`] when the search already ended, and
    /// executor or snapshot errors raised during the round.
    pub fn step(&mut self) -> Result<StepOutcome, SearchError> {
        if !self.state.running() {
            return Err(SearchError::NotRunning(self.state.status));
        }
        let Some(load) = usize::try_from(self.state.iteration_index)
            .ok()
            .and_then(|index| self.datapoints.get(index))
        else {
            return Err(SearchError::NotRunning(self.state.status));
        };
        if self.state.iteration_index == 0 {
            self.audit.record(&self.event("search_started"));
        }
        self.state.iteration_index += 1;
        let iteration = self.state.iteration_index;

        let summary = match self.measure(iteration, load) {
            Ok(summary) => summary,
            Err(err) => {
                self.state.status = SearchStatus::Failed;
                let mut event = self.iteration_event("iteration_failed", iteration, load);
                event.message = Some(err.to_string());
                self.audit.record(&event);
                return Err(err);
            }
        };

        let verdict = self.evaluator.evaluate(&summary);
        self.record_round(iteration, load, summary, verdict);
        let total = u64::try_from(self.datapoints.len()).unwrap_or(u64::MAX);
        let finished = verdict.must_stop || iteration >= total;
        if finished {
            self.state.status = if verdict.must_stop {
                SearchStatus::StoppedByThreshold
            } else {
                SearchStatus::Exhausted
            };
        }

        let snapshot_state = if finished { SnapshotState::Done } else { SnapshotState::Running };
        let report = self
            .reporter
            .write_snapshot(&SearchSnapshot::new(&self.state, &self.config.axis_label, snapshot_state));
        match report {
            Ok(()) if finished => {
                let reason =
                    if verdict.must_stop { StopReason::ThresholdBreach } else { StopReason::Exhausted };
                self.state.status = SearchStatus::Done(reason);
                let mut event = self.event("search_completed");
                event.outcome = Some(reason.as_str());
                self.audit.record(&event);
                Ok(StepOutcome::Finished(reason))
            }
            Ok(()) => Ok(StepOutcome::Continue),
            Err(err) => {
                let mut event = self.iteration_event("snapshot_failed", iteration, load);
                event.message = Some(err.to_string());
                self.audit.record(&event);
                if finished {
                    return Err(SearchError::FinalSnapshot(err));
                }
                match self.config.on_snapshot_failure {
                    ReporterFailurePolicy::Abort => {
                        self.state.status = SearchStatus::Failed;
                        Err(SearchError::Snapshot(err))
                    }
                    ReporterFailurePolicy::Continue => Ok(StepOutcome::Continue),
                }
            }
        }
    }

    /// Invokes the executor and validates its summary.
    fn measure(&mut self, iteration: u64, load: LoadLevel) -> Result<IterationSummary, SearchError> {
        let request = IterationRequest {
            iteration,
            load,
            duration: self.config.iteration_duration,
            mode: self.config.mode,
            extra_params: &self.config.extra_params,
        };
        let summary = self.executor.run(&request).map_err(|source| SearchError::Executor {
            load,
            source,
        })?;
        summary.validate().map_err(|source| SearchError::InvalidSummary {
            load,
            source,
        })?;
        Ok(summary)
    }

    /// Applies a classified summary to the capacity record and history.
    fn record_round(
        &mut self,
        iteration: u64,
        load: LoadLevel,
        summary: IterationSummary,
        verdict: Verdict,
    ) {
        if verdict.acceptable {
            let achieved = summary.achieved_rps();
            if achieved > self.state.best.achieved_rps {
                self.state.best = CapacityRecord {
                    achieved_rps: achieved,
                    at_load_level: Some(load),
                };
            }
        }
        let mut event = self.iteration_event("iteration_completed", iteration, load);
        event.failure_rate = Some(summary.failure_rate);
        event.median_latency_ms = Some(summary.median_latency_ms);
        event.acceptable = Some(verdict.acceptable);
        event.must_stop = Some(verdict.must_stop);
        self.state.history.push(HistoryEntry {
            iteration,
            load,
            summary,
            verdict,
        });
        self.audit.record(&event);
    }

    // ========================================================================
    // SECTION: Publication
    // ========================================================================

    /// Builds the capacity publication of a finished search.
    ///
    /// Returns `None` until the search reaches `done`.
    #[must_use]
    pub fn publication(&self, context: PublicationContext) -> Option<CapacityPublication> {
        if !matches!(self.state.status, SearchStatus::Done(_)) {
            return None;
        }
        Some(CapacityPublication {
            experiment_name: context.experiment_name,
            mode_label: self.config.mode.label().to_string(),
            version_id_a: context.version_id_a,
            version_id_b: context.version_id_b,
            is_ci: context.is_ci,
            capacity_rps: self.state.best.achieved_rps,
            output_dir: context.output_dir,
            start_time: context.start_time,
        })
    }

    /// Forwards a publication to a result sink once, auditing the outcome.
    ///
    /// The search outcome is unaffected by publication failures.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`PublishError`] so callers may surface it.
    pub fn publish_capacity<S: ResultSink + ?Sized>(
        &self,
        sink: &S,
        publication: &CapacityPublication,
    ) -> Result<(), PublishError> {
        let result = sink.publish_capacity(publication);
        let event = match &result {
            Ok(()) => self.event("capacity_published"),
            Err(err) => {
                let mut failed = self.event("publish_failed");
                failed.message = Some(err.to_string());
                failed
            }
        };
        self.audit.record(&event);
        result
    }

    // ========================================================================
    // SECTION: Audit Helpers
    // ========================================================================

    /// Builds a run-level audit event.
    fn event(&self, name: &'static str) -> SearchAuditEvent {
        let mut event = SearchAuditEvent::new(name, self.state.run_name.clone(), self.state.mode);
        event.best_rps = self.state.best.achieved_rps;
        event.best_load_rps = self.state.best.at_load_level;
        event
    }

    /// Builds a per-iteration audit event.
    fn iteration_event(&self, name: &'static str, iteration: u64, load: LoadLevel) -> SearchAuditEvent {
        let mut event = self.event(name);
        event.iteration = Some(iteration);
        event.load_rps = Some(load);
        event
    }
}

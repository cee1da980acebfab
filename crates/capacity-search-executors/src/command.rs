// crates/capacity-search-executors/src/command.rs
// ============================================================================
// Module: Command Executor
// Description: Runs an external workload generator once per iteration.
// Purpose: Bridge the search engine to any load tool that prints a JSON report.
// Dependencies: capacity-search-core, crate::report
// ============================================================================

//! ## Overview
//! [`CommandExecutor`] spawns the configured program with placeholder-expanded
//! arguments, reads its stdout under a size limit, and enforces a hard
//! deadline. The program drives the target however it likes; only its final
//! JSON report is interpreted.
//!
//! Supported placeholders: `{rps}`, `{duration_secs}`, `{mode}`,
//! `{iteration}`, and `{param.<name>}` for configured extra parameters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use capacity_search_core::ExecutorError;
use capacity_search_core::IterationExecutor;
use capacity_search_core::IterationRequest;
use capacity_search_core::IterationSummary;

use crate::report::parse_report;
use crate::report::read_limited;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Interval between child status polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// External workload generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,
    /// Argument templates.
    pub args: Vec<String>,
    /// Working directory.
    pub working_dir: Option<PathBuf>,
    /// Hard deadline per iteration.
    pub timeout: Duration,
    /// Maximum stdout size in bytes.
    pub max_report_bytes: usize,
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Executor spawning one workload generator process per iteration.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    /// Invocation template.
    spec: CommandSpec,
}

impl CommandExecutor {
    /// Creates a command executor.
    #[must_use]
    pub const fn new(spec: CommandSpec) -> Self {
        Self {
            spec,
        }
    }

    /// Returns the expanded arguments for a request.
    #[must_use]
    pub fn expand_args(&self, request: &IterationRequest<'_>) -> Vec<String> {
        self.spec
            .args
            .iter()
            .map(|template| expand_placeholders(template, request))
            .collect()
    }

    /// Spawns the generator for a request.
    fn spawn(&self, request: &IterationRequest<'_>) -> Result<Child, ExecutorError> {
        let mut cmd = Command::new(&self.spec.program);
        cmd.args(self.expand_args(request));
        if let Some(dir) = &self.spec.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());
        cmd.spawn().map_err(|err| {
            ExecutorError::Workload(format!("failed to spawn {}: {err}", self.spec.program))
        })
    }
}

impl IterationExecutor for CommandExecutor {
    fn run(&mut self, request: &IterationRequest<'_>) -> Result<IterationSummary, ExecutorError> {
        let started = Instant::now();
        let deadline = started.checked_add(self.spec.timeout).ok_or_else(|| {
            ExecutorError::Workload(format!(
                "generator timeout of {}s is out of range",
                self.spec.timeout.as_secs()
            ))
        })?;
        let mut child = self.spawn(request)?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecutorError::Workload("generator stdout unavailable".to_string()))?;
        let max_bytes = self.spec.max_report_bytes;
        let reader = thread::spawn(move || read_limited(stdout, max_bytes));

        let status = wait_with_deadline(&mut child, deadline, self.spec.timeout)?;
        let output = reader
            .join()
            .map_err(|_| ExecutorError::Workload("report reader thread panicked".to_string()))??;
        let elapsed_secs = started.elapsed().as_secs_f64();

        if !status.success() {
            return Err(ExecutorError::Workload(format!("generator exited with {status}")));
        }
        parse_report(&output)?.into_summary(elapsed_secs)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Waits for the child, killing it once the deadline passes.
fn wait_with_deadline(
    child: &mut Child,
    deadline: Instant,
    timeout: Duration,
) -> Result<std::process::ExitStatus, ExecutorError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExecutorError::Workload(format!(
                    "generator exceeded timeout of {}s",
                    timeout.as_secs()
                )));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                return Err(ExecutorError::Workload(format!("unable to wait for generator: {err}")));
            }
        }
    }
}

/// Expands request placeholders in an argument template.
///
/// The template is scanned once from left to right; substituted values are
/// emitted verbatim and never expanded again. Unknown placeholders are kept.
#[must_use]
pub fn expand_placeholders(template: &str, request: &IterationRequest<'_>) -> String {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[.. open]);
        let candidate = &rest[open ..];
        let Some(close) = candidate[1 ..].find(['{', '}']).map(|index| index + 1) else {
            expanded.push_str(candidate);
            return expanded;
        };
        if !candidate[close ..].starts_with('}') {
            expanded.push_str(&candidate[.. close]);
            rest = &candidate[close ..];
            continue;
        }
        let name = &candidate[1 .. close];
        match placeholder_value(name, request) {
            Some(value) => expanded.push_str(&value),
            None => expanded.push_str(&candidate[..= close]),
        }
        rest = &candidate[close + 1 ..];
    }
    expanded.push_str(rest);
    expanded
}

/// Resolves one placeholder name.
fn placeholder_value(name: &str, request: &IterationRequest<'_>) -> Option<String> {
    match name {
        "rps" => Some(request.load.to_string()),
        "duration_secs" => Some(request.duration.as_secs().to_string()),
        "mode" => Some(request.mode.as_str().to_string()),
        "iteration" => Some(request.iteration.to_string()),
        _ => name
            .strip_prefix("param.")
            .and_then(|param| request.extra_params.get(param))
            .cloned(),
    }
}

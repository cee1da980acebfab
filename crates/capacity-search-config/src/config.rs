// crates/capacity-search-config/src/config.rs
// ============================================================================
// Module: Capacity Search Configuration
// Description: Configuration loading and validation for capacity searches.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: capacity-search-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! A file selects a preset, optionally overrides per-mode values, and wires
//! the executor, reporter, result sink, and audit sink. Invalid configuration
//! fails closed before any load is driven against the target.
//!
//! This layer upholds the threshold ordering invariant the evaluator relies
//! on: stop limits must be at least the allowable limits for both metrics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use capacity_search_core::DEFAULT_AXIS_LABEL;
use capacity_search_core::LoadMode;
use capacity_search_core::ReporterFailurePolicy;
use capacity_search_core::SearchConfig;
use capacity_search_core::ThresholdPair;
use capacity_search_core::Thresholds;
use capacity_search_core::generate_datapoints;
use serde::Deserialize;
use thiserror::Error;

use crate::presets::ModeProfile;
use crate::presets::Preset;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "capacity-search.toml";
/// Environment variable holding the configuration path.
pub(crate) const CONFIG_ENV_VAR: &str = "CAPACITY_SEARCH_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum iteration duration in seconds (one day).
pub(crate) const MAX_ITERATION_DURATION_SECS: u64 = 86_400;
/// Maximum length of names and labels.
pub(crate) const MAX_NAME_LENGTH: usize = 128;
/// Maximum number of extra executor parameters.
pub(crate) const MAX_EXTRA_PARAMS: usize = 64;
/// Maximum number of command arguments.
pub(crate) const MAX_COMMAND_ARGS: usize = 256;
/// Default workload report size limit in bytes.
pub(crate) const DEFAULT_MAX_REPORT_BYTES: usize = 1024 * 1024;
/// Grace period added to the iteration duration for command timeouts.
pub(crate) const DEFAULT_COMMAND_GRACE_SECS: u64 = 120;
/// Maximum explicit command timeout in seconds.
pub(crate) const MAX_COMMAND_TIMEOUT_SECS: u64 =
    MAX_ITERATION_DURATION_SECS + DEFAULT_COMMAND_GRACE_SECS;
/// Default HTTP publish timeout in milliseconds.
pub(crate) const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;
/// Default snapshot output directory.
const DEFAULT_OUTPUT_DIR: &str = "capacity-search-out";

// ============================================================================
// SECTION: Root Configuration
// ============================================================================

/// Root configuration for a capacity search run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapacitySearchConfig {
    /// Run-level settings.
    #[serde(default)]
    pub search: SearchSection,
    /// Query-mode overrides of the preset profile.
    #[serde(default)]
    pub query: ModeOverrides,
    /// Update-mode overrides of the preset profile.
    #[serde(default)]
    pub update: ModeOverrides,
    /// Iteration executor; required to run a search.
    #[serde(default)]
    pub executor: Option<ExecutorConfig>,
    /// Snapshot reporting.
    #[serde(default)]
    pub report: ReportConfig,
    /// Result publication.
    #[serde(default)]
    pub publish: PublishConfig,
    /// Audit sink.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl CapacitySearchConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from `path`, else `CAPACITY_SEARCH_CONFIG`, else
    /// `capacity-search.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        for mode in [LoadMode::Query, LoadMode::Update] {
            self.mode_profile(mode)?;
        }
        if let Some(executor) = &self.executor {
            executor.validate()?;
        }
        self.report.validate()?;
        self.publish.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the measurement mode selected by the file.
    #[must_use]
    pub const fn mode(&self) -> LoadMode {
        self.search.mode
    }

    /// Returns the effective run name.
    #[must_use]
    pub fn run_name(&self) -> String {
        self.search
            .run_name
            .clone()
            .unwrap_or_else(|| self.search.preset.profile().run_name.to_string())
    }

    /// Returns the effective experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> String {
        self.search
            .experiment_name
            .clone()
            .unwrap_or_else(|| self.search.preset.profile().experiment_name.to_string())
    }

    /// Returns the effective iteration duration.
    #[must_use]
    pub fn iteration_duration(&self) -> Duration {
        Duration::from_secs(
            self.search
                .iteration_duration_secs
                .unwrap_or_else(|| self.search.preset.profile().iteration_duration_secs),
        )
    }

    /// Returns the preset profile for a mode with file overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the effective profile is unusable.
    pub fn mode_profile(&self, mode: LoadMode) -> Result<ModeProfile, ConfigError> {
        let base = *self.search.preset.profile().mode(mode);
        let overrides = match mode {
            LoadMode::Query => &self.query,
            LoadMode::Update => &self.update,
        };
        let profile = overrides.apply(base);
        validate_profile(mode, &profile)?;
        Ok(profile)
    }

    /// Builds the core search configuration for a mode.
    ///
    /// Uses the file's mode when `mode` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the effective profile is unusable.
    pub fn to_search_config(&self, mode: Option<LoadMode>) -> Result<SearchConfig, ConfigError> {
        let mode = mode.unwrap_or(self.search.mode);
        let profile = self.mode_profile(mode)?;
        Ok(SearchConfig {
            run_name: self.run_name(),
            mode,
            axis_label: self.search.axis_label.clone(),
            iteration_duration: self.iteration_duration(),
            plan: profile.plan,
            thresholds: profile.thresholds,
            extra_params: self.search.params.clone(),
            on_snapshot_failure: self.search.on_snapshot_failure,
        })
    }
}

// ============================================================================
// SECTION: Search Section
// ============================================================================

/// Run-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSection {
    /// Preset supplying default sequences and thresholds.
    #[serde(default)]
    pub preset: Preset,
    /// Measurement mode.
    #[serde(default)]
    pub mode: LoadMode,
    /// Snapshot key; defaults to the preset's run name.
    #[serde(default)]
    pub run_name: Option<String>,
    /// Experiment name for publication; defaults to the preset's name.
    #[serde(default)]
    pub experiment_name: Option<String>,
    /// Iteration duration override in seconds.
    #[serde(default)]
    pub iteration_duration_secs: Option<u64>,
    /// Load axis label in snapshots.
    #[serde(default = "default_axis_label")]
    pub axis_label: String,
    /// Behavior when a non-final snapshot fails.
    #[serde(default)]
    pub on_snapshot_failure: ReporterFailurePolicy,
    /// Extra parameters forwarded to the executor (e.g. `payload_size`).
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            mode: LoadMode::default(),
            run_name: None,
            experiment_name: None,
            iteration_duration_secs: None,
            axis_label: default_axis_label(),
            on_snapshot_failure: ReporterFailurePolicy::default(),
            params: BTreeMap::new(),
        }
    }
}

impl SearchSection {
    /// Validates run-level settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(run_name) = &self.run_name {
            validate_name("search.run_name", run_name)?;
        }
        if let Some(experiment_name) = &self.experiment_name {
            validate_name("search.experiment_name", experiment_name)?;
        }
        validate_name("search.axis_label", &self.axis_label)?;
        if let Some(duration) = self.iteration_duration_secs
            && (duration == 0 || duration > MAX_ITERATION_DURATION_SECS)
        {
            return Err(ConfigError::Invalid(format!(
                "search.iteration_duration_secs must be between 1 and {MAX_ITERATION_DURATION_SECS}"
            )));
        }
        if self.params.len() > MAX_EXTRA_PARAMS {
            return Err(ConfigError::Invalid(format!(
                "search.params exceeds {MAX_EXTRA_PARAMS} entries"
            )));
        }
        for key in self.params.keys() {
            validate_name("search.params key", key)?;
        }
        Ok(())
    }
}

/// Default axis label.
fn default_axis_label() -> String {
    DEFAULT_AXIS_LABEL.to_string()
}

// ============================================================================
// SECTION: Mode Overrides
// ============================================================================

/// Per-mode overrides of the preset profile.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeOverrides {
    /// Target load override.
    #[serde(default)]
    pub target_rps: Option<u64>,
    /// Initial load override.
    #[serde(default)]
    pub initial_rps: Option<u64>,
    /// Ceiling override.
    #[serde(default)]
    pub max_rps: Option<u64>,
    /// Step override.
    #[serde(default)]
    pub increment_rps: Option<u64>,
    /// Growth factor override.
    #[serde(default)]
    pub growth_factor: Option<f64>,
    /// Allowable failure rate override.
    #[serde(default)]
    pub allowable_failure_rate: Option<f64>,
    /// Allowable median latency override (ms).
    #[serde(default)]
    pub allowable_median_latency_ms: Option<f64>,
    /// Stop failure rate override.
    #[serde(default)]
    pub stop_failure_rate: Option<f64>,
    /// Stop median latency override (ms).
    #[serde(default)]
    pub stop_median_latency_ms: Option<f64>,
}

impl ModeOverrides {
    /// Applies overrides to a preset profile.
    #[must_use]
    pub fn apply(&self, base: ModeProfile) -> ModeProfile {
        let mut profile = base;
        profile.plan.target_rps = self.target_rps.unwrap_or(base.plan.target_rps);
        profile.plan.initial_rps = self.initial_rps.unwrap_or(base.plan.initial_rps);
        profile.plan.max_rps = self.max_rps.unwrap_or(base.plan.max_rps);
        profile.plan.increment_rps = self.increment_rps.unwrap_or(base.plan.increment_rps);
        profile.plan.growth_factor = self.growth_factor.unwrap_or(base.plan.growth_factor);
        profile.thresholds = Thresholds {
            allowable: ThresholdPair::new(
                self.allowable_failure_rate.unwrap_or(base.thresholds.allowable.failure_rate),
                self.allowable_median_latency_ms
                    .unwrap_or(base.thresholds.allowable.median_latency_ms),
            ),
            stop: ThresholdPair::new(
                self.stop_failure_rate.unwrap_or(base.thresholds.stop.failure_rate),
                self.stop_median_latency_ms.unwrap_or(base.thresholds.stop.median_latency_ms),
            ),
        };
        profile
    }
}

/// Validates an effective mode profile.
fn validate_profile(mode: LoadMode, profile: &ModeProfile) -> Result<(), ConfigError> {
    generate_datapoints(&profile.plan)
        .map_err(|err| ConfigError::Invalid(format!("{mode} datapoints: {err}")))?;
    let thresholds = &profile.thresholds;
    for (field, value) in [
        ("allowable_failure_rate", thresholds.allowable.failure_rate),
        ("stop_failure_rate", thresholds.stop.failure_rate),
    ] {
        if !value.is_finite() || !(0.0 ..= 1.0).contains(&value) {
            return Err(ConfigError::Invalid(format!("{mode}.{field} must be within [0, 1]")));
        }
    }
    for (field, value) in [
        ("allowable_median_latency_ms", thresholds.allowable.median_latency_ms),
        ("stop_median_latency_ms", thresholds.stop.median_latency_ms),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::Invalid(format!("{mode}.{field} must be greater than zero")));
        }
    }
    if !thresholds.is_ordered() {
        return Err(ConfigError::Invalid(format!(
            "{mode} stop thresholds must be at least the allowable thresholds"
        )));
    }
    Ok(())
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Iteration executor configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutorConfig {
    /// Spawn an external workload generator per iteration.
    Command(CommandExecutorConfig),
    /// Replay recorded summaries from a JSON file.
    Replay(ReplayExecutorConfig),
}

impl ExecutorConfig {
    /// Validates executor configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Command(config) => config.validate(),
            Self::Replay(config) => validate_path_string("executor.path", &config.path.to_string_lossy()),
        }
    }
}

/// External workload generator configuration.
///
/// Arguments may contain the placeholders `{rps}`, `{duration_secs}`,
/// `{mode}`, `{iteration}`, and `{param.<name>}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandExecutorConfig {
    /// Program to execute.
    pub program: String,
    /// Program arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Hard timeout per iteration; defaults to the iteration duration plus a grace period.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum size of the JSON report read from stdout.
    #[serde(default = "default_max_report_bytes")]
    pub max_report_bytes: usize,
    /// Working directory for the program.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl CommandExecutorConfig {
    /// Validates command executor configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::Invalid("executor.program must be non-empty".to_string()));
        }
        validate_path_string("executor.program", &self.program)?;
        if self.args.len() > MAX_COMMAND_ARGS {
            return Err(ConfigError::Invalid(format!(
                "executor.args exceeds {MAX_COMMAND_ARGS} entries"
            )));
        }
        if let Some(timeout) = self.timeout_secs
            && (timeout == 0 || timeout > MAX_COMMAND_TIMEOUT_SECS)
        {
            return Err(ConfigError::Invalid(format!(
                "executor.timeout_secs must be between 1 and {MAX_COMMAND_TIMEOUT_SECS}"
            )));
        }
        if self.max_report_bytes == 0 || self.max_report_bytes > MAX_CONFIG_FILE_SIZE * 16 {
            return Err(ConfigError::Invalid(
                "executor.max_report_bytes must be between 1 and 16 MiB".to_string(),
            ));
        }
        if let Some(dir) = &self.working_dir {
            validate_path_string("executor.working_dir", &dir.to_string_lossy())?;
        }
        Ok(())
    }

    /// Returns the effective timeout for an iteration duration.
    #[must_use]
    pub fn timeout(&self, iteration_duration: Duration) -> Duration {
        self.timeout_secs.map_or_else(
            || iteration_duration.saturating_add(Duration::from_secs(DEFAULT_COMMAND_GRACE_SECS)),
            Duration::from_secs,
        )
    }
}

/// Default report size limit.
const fn default_max_report_bytes() -> usize {
    DEFAULT_MAX_REPORT_BYTES
}

/// Recorded summary replay configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayExecutorConfig {
    /// JSON file holding an array of iteration summaries.
    pub path: PathBuf,
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Snapshot reporting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory receiving one snapshot document per run and mode.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Optional JSON-lines file receiving every snapshot.
    #[serde(default)]
    pub snapshot_log: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            snapshot_log: None,
        }
    }
}

impl ReportConfig {
    /// Validates reporting configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("report.output_dir", &self.output_dir.to_string_lossy())?;
        if let Some(log) = &self.snapshot_log {
            validate_path_string("report.snapshot_log", &log.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Default output directory.
fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

// ============================================================================
// SECTION: Publish
// ============================================================================

/// Result publication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Whether the run executes in CI.
    #[serde(default)]
    pub is_ci: bool,
    /// Version identifier of the system under test.
    #[serde(default)]
    pub version_id_a: String,
    /// Version identifier of the baseline; defaults to `version_id_a`.
    #[serde(default)]
    pub version_id_b: Option<String>,
    /// Destination of the final result.
    #[serde(default)]
    pub sink: PublishSinkConfig,
}

impl PublishConfig {
    /// Validates publication configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.version_id_a.len() > MAX_NAME_LENGTH {
            return Err(ConfigError::Invalid("publish.version_id_a exceeds max length".to_string()));
        }
        if self.version_id_b.as_ref().is_some_and(|value| value.len() > MAX_NAME_LENGTH) {
            return Err(ConfigError::Invalid("publish.version_id_b exceeds max length".to_string()));
        }
        self.sink.validate()
    }

    /// Returns the effective baseline version identifier.
    #[must_use]
    pub fn version_id_b(&self) -> String {
        self.version_id_b.clone().unwrap_or_else(|| self.version_id_a.clone())
    }
}

/// Result sink selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PublishSinkConfig {
    /// Do not publish.
    #[default]
    None,
    /// Append the result as a JSON line.
    File {
        /// Destination file.
        path: PathBuf,
    },
    /// Print the result as a JSON line to stdout.
    Log,
    /// POST the result as JSON to an HTTP endpoint.
    Http {
        /// Endpoint URL.
        url: String,
        /// Request timeout in milliseconds.
        #[serde(default = "default_http_timeout_ms")]
        timeout_ms: u64,
    },
}

impl PublishSinkConfig {
    /// Validates the sink selection.
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::None | Self::Log => Ok(()),
            Self::File {
                path,
            } => validate_path_string("publish.sink.path", &path.to_string_lossy()),
            Self::Http {
                url,
                timeout_ms,
            } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::Invalid(
                        "publish.sink.url must use http or https".to_string(),
                    ));
                }
                if url.len() > MAX_TOTAL_PATH_LENGTH {
                    return Err(ConfigError::Invalid("publish.sink.url exceeds max length".to_string()));
                }
                if *timeout_ms == 0 {
                    return Err(ConfigError::Invalid(
                        "publish.sink.timeout_ms must be greater than zero".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Default HTTP timeout.
const fn default_http_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditConfig {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// Append JSON lines to a file.
    File {
        /// Destination file.
        path: PathBuf,
    },
    /// Discard audit events.
    None,
}

impl AuditConfig {
    /// Validates the audit sink selection.
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::File {
                path,
            } => validate_path_string("audit.path", &path.to_string_lossy()),
            Self::Stderr | Self::None => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a name or label.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/capacity-search-cli/src/main.rs
// ============================================================================
// Module: Capacity Search CLI Entry Point
// Description: Command dispatcher for capacity searches and offline utilities.
// Purpose: Provide a safe, localized CLI around the capacity search engine.
// Dependencies: clap, capacity-search-core, capacity-search-config, tokio, time.
// ============================================================================

//! ## Overview
//! The capacity-search CLI runs a full search from `capacity-search.toml`
//! and offers offline helpers: datapoint previews, single-measurement
//! threshold evaluation, config validation, and snapshot verification. All
//! user-facing strings are routed through the i18n catalog. Progress lines go
//! to stderr; machine-readable results go to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use capacity_search_broker::FanOutSnapshotReporter;
use capacity_search_broker::FileAuditSink;
use capacity_search_broker::FileResultSink;
use capacity_search_broker::FileSnapshotReporter;
use capacity_search_broker::HttpResultSink;
use capacity_search_broker::LogResultSink;
use capacity_search_broker::LogSnapshotReporter;
use capacity_search_broker::MAX_SNAPSHOT_BYTES;
use capacity_search_broker::StderrAuditSink;
use capacity_search_broker::verify_snapshot_document;
use capacity_search_cli::exit::FailureKind;
use capacity_search_cli::i18n::Locale;
use capacity_search_cli::i18n::set_locale;
use capacity_search_cli::t;
use capacity_search_config::AuditConfig;
use capacity_search_config::CapacitySearchConfig;
use capacity_search_config::ExecutorConfig;
use capacity_search_config::Preset;
use capacity_search_config::PublishSinkConfig;
use capacity_search_core::CapacitySearch;
use capacity_search_core::HistoryEntry;
use capacity_search_core::IterationExecutor;
use capacity_search_core::IterationSummary;
use capacity_search_core::LoadMode;
use capacity_search_core::NoopAuditSink;
use capacity_search_core::PublicationContext;
use capacity_search_core::ResultSink;
use capacity_search_core::SearchAuditSink;
use capacity_search_core::SearchState;
use capacity_search_core::SnapshotReporter;
use capacity_search_core::StepOutcome;
use capacity_search_core::StopReason;
use capacity_search_core::ThresholdEvaluator;
use capacity_search_core::Timestamp;
use capacity_search_core::generate_datapoints;
use capacity_search_executors::CommandExecutor;
use capacity_search_executors::CommandSpec;
use capacity_search_executors::ReplayExecutor;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a replay file.
const MAX_REPLAY_BYTES: usize = 16 * 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "CAPACITY_SEARCH_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "capacity-search", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `CAPACITY_SEARCH_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a capacity search against the configured executor.
    Search(SearchCommand),
    /// Print the load levels a search would probe.
    Datapoints(DatapointsCommand),
    /// Classify one measurement against the configured thresholds.
    Evaluate(EvaluateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Snapshot utilities.
    Snapshot {
        /// Selected snapshot subcommand.
        #[command(subcommand)]
        command: SnapshotCommand,
    },
}

/// Configuration selection shared by commands.
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Path to `capacity-search.toml`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Measurement mode (overrides `search.mode`).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

/// Arguments for `search`.
#[derive(Args, Debug)]
struct SearchCommand {
    /// Config selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Snapshot directory (overrides `report.output_dir`).
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

/// Arguments for `datapoints`.
#[derive(Args, Debug)]
struct DatapointsCommand {
    /// Config selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Use a preset without reading a config file.
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Config selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Use a preset without reading a config file.
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Measured failure rate in `[0, 1]`.
    #[arg(long)]
    failure_rate: f64,
    /// Measured median latency in milliseconds.
    #[arg(long)]
    median_latency_ms: f64,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Path to `capacity-search.toml`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Snapshot subcommands.
#[derive(Subcommand, Debug)]
enum SnapshotCommand {
    /// Verify a snapshot document's digest.
    Verify(SnapshotVerifyCommand),
}

/// Arguments for `snapshot verify`.
#[derive(Args, Debug)]
struct SnapshotVerifyCommand {
    /// Snapshot document path.
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

/// Measurement mode selection.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum ModeArg {
    /// Read-only query calls.
    Query,
    /// State-changing update calls.
    Update,
}

impl From<ModeArg> for LoadMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Query => Self::Query,
            ModeArg::Update => Self::Update,
        }
    }
}

/// Preset selection.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum PresetArg {
    /// Large-memory experiment profile.
    LargeMemory,
    /// System-baseline experiment profile.
    SystemBaseline,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::LargeMemory => Self::LargeMemory,
            PresetArg::SystemBaseline => Self::SystemBaseline,
        }
    }
}

/// Output format selection.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Exit code classification.
    exit: FailureKind,
}

impl CliError {
    /// Constructs a new [`CliError`] without a dedicated exit code.
    const fn new(message: String) -> Self {
        Self {
            message,
            exit: FailureKind::Other,
        }
    }

    /// Constructs a configuration error.
    const fn config(message: String) -> Self {
        Self {
            message,
            exit: FailureKind::Config,
        }
    }

    /// Constructs an error with an explicit classification.
    const fn with_kind(message: String, exit: FailureKind) -> Self {
        Self {
            message,
            exit,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Search(command) => command_search(command).await,
        Commands::Datapoints(command) => command_datapoints(&command),
        Commands::Evaluate(command) => command_evaluate(&command),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
        Commands::Snapshot {
            command,
        } => match command {
            SnapshotCommand::Verify(command) => command_snapshot_verify(&command),
        },
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(&help).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Search Command
// ============================================================================

/// Executes the `search` command on a blocking worker.
async fn command_search(command: SearchCommand) -> CliResult<ExitCode> {
    tokio::task::spawn_blocking(move || run_search(&command))
        .await
        .map_err(|err| CliError::new(t!("search.join_failed", error = err)))?
}

/// Collaborators assembled from configuration.
struct SearchWiring {
    /// Iteration executor.
    executor: Box<dyn IterationExecutor + Send>,
    /// Snapshot reporter.
    reporter: FanOutSnapshotReporter,
    /// Audit sink.
    audit: Box<dyn SearchAuditSink + Send + Sync>,
    /// Result sink, when publication is enabled.
    sink: Option<Box<dyn ResultSink + Send + Sync>>,
}

/// Runs a full search and publishes its result.
fn run_search(command: &SearchCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config.config.as_deref())?;
    if let Some(output_dir) = &command.output_dir {
        config.report.output_dir.clone_from(output_dir);
    }
    let mode = command.config.mode.map(LoadMode::from);
    let search_config = config
        .to_search_config(mode)
        .map_err(|err| CliError::config(t!("config.load_failed", error = err)))?;
    let wiring = build_wiring(&config, search_config.iteration_duration)?;

    let start = OffsetDateTime::now_utc();
    let mut search =
        CapacitySearch::new(search_config, wiring.executor, wiring.reporter, wiring.audit)
            .map_err(|err| {
                CliError::with_kind(
                    t!("search.init_failed", error = err),
                    FailureKind::from_search_error(&err),
                )
            })?;
    let levels = search.datapoints().levels();
    let (first, last) = match (levels.first(), levels.last()) {
        (Some(first), Some(last)) => (first.get(), last.get()),
        _ => (0, 0),
    };
    emit_progress(&t!(
        "search.started",
        run_name = search.state().run_name,
        mode = search.config().mode,
        count = levels.len(),
        first = first,
        last = last,
        duration = search.config().iteration_duration.as_secs(),
        start = start.format(&Rfc3339).unwrap_or_default()
    ));
    let total = levels.len();

    let reason = loop {
        match search.step() {
            Ok(outcome) => {
                if let Some(entry) = search.state().history.entries().last() {
                    emit_progress(&progress_line(entry, total, search.state()));
                }
                if let StepOutcome::Finished(reason) = outcome {
                    break reason;
                }
            }
            Err(err) => {
                return Err(CliError::with_kind(
                    t!("search.failed", error = err),
                    FailureKind::from_search_error(&err),
                ));
            }
        }
    };

    write_stdout_line(&completion_line(search.state(), reason))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    emit_progress(&t!("search.snapshot.location", path = config.report.output_dir.display()));

    if let Some(sink) = wiring.sink {
        let context = PublicationContext {
            experiment_name: config.experiment_name(),
            version_id_a: config.publish.version_id_a.clone(),
            version_id_b: config.publish.version_id_b(),
            is_ci: config.publish.is_ci,
            output_dir: config.report.output_dir.display().to_string(),
            start_time: unix_millis(start),
        };
        if let Some(publication) = search.publication(context) {
            match search.publish_capacity(sink.as_ref(), &publication) {
                Ok(()) => emit_progress(&t!("search.publish.ok")),
                Err(err) => emit_progress(&t!("search.publish.failed", error = err)),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Builds executor, reporter, audit sink, and result sink from configuration.
fn build_wiring(config: &CapacitySearchConfig, iteration_duration: Duration) -> CliResult<SearchWiring> {
    let executor: Box<dyn IterationExecutor + Send> = match &config.executor {
        None => return Err(CliError::config(t!("search.executor.missing"))),
        Some(ExecutorConfig::Command(command)) => Box::new(CommandExecutor::new(CommandSpec {
            program: command.program.clone(),
            args: command.args.clone(),
            working_dir: command.working_dir.clone(),
            timeout: command.timeout(iteration_duration),
            max_report_bytes: command.max_report_bytes,
        })),
        Some(ExecutorConfig::Replay(replay)) => Box::new(
            ReplayExecutor::from_path(&replay.path, MAX_REPLAY_BYTES).map_err(|err| {
                CliError::config(t!("search.executor.init_failed", error = err))
            })?,
        ),
    };

    let mut reporters: Vec<Box<dyn SnapshotReporter + Send + Sync>> =
        vec![Box::new(FileSnapshotReporter::new(config.report.output_dir.clone()))];
    if let Some(path) = &config.report.snapshot_log {
        let file = open_append(path).map_err(|err| {
            CliError::with_kind(
                t!("search.reporter.init_failed", path = path.display(), error = err),
                FailureKind::Report,
            )
        })?;
        reporters.push(Box::new(LogSnapshotReporter::new(file)));
    }

    let audit: Box<dyn SearchAuditSink + Send + Sync> = match &config.audit {
        AuditConfig::Stderr => Box::new(StderrAuditSink),
        AuditConfig::None => Box::new(NoopAuditSink),
        AuditConfig::File {
            path,
        } => Box::new(FileAuditSink::new(path).map_err(|err| {
            CliError::new(t!("search.audit.init_failed", path = path.display(), error = err))
        })?),
    };

    let sink: Option<Box<dyn ResultSink + Send + Sync>> = match &config.publish.sink {
        PublishSinkConfig::None => None,
        PublishSinkConfig::File {
            path,
        } => Some(Box::new(FileResultSink::new(path.clone()))),
        PublishSinkConfig::Log => Some(Box::new(LogResultSink::new(std::io::stdout()))),
        PublishSinkConfig::Http {
            url,
            timeout_ms,
        } => Some(Box::new(
            HttpResultSink::new(url, Duration::from_millis(*timeout_ms))
                .map_err(|err| CliError::config(t!("search.sink.init_failed", error = err)))?,
        )),
    };

    Ok(SearchWiring {
        executor,
        reporter: FanOutSnapshotReporter::new(reporters),
        audit,
        sink,
    })
}

/// Formats one per-iteration progress line.
fn progress_line(entry: &HistoryEntry, total: usize, state: &SearchState) -> String {
    t!(
        "search.progress",
        iteration = entry.iteration,
        total = total,
        rps = entry.load,
        failure_rate = format!("{:.4}", entry.summary.failure_rate),
        median_ms = format!("{:.1}", entry.summary.median_latency_ms),
        best_rps = format!("{:.2}", state.best.achieved_rps)
    )
}

/// Formats the final result line.
fn completion_line(state: &SearchState, reason: StopReason) -> String {
    let iterations = state.history.len();
    match state.best.at_load_level {
        Some(load) => t!(
            "search.completed",
            capacity = format!("{:.2}", state.best.achieved_rps),
            load = load,
            iterations = iterations,
            reason = reason.as_str()
        ),
        None => t!("search.completed.none", iterations = iterations, reason = reason.as_str()),
    }
}

/// Converts a wall-clock instant into a unix-millisecond timestamp.
fn unix_millis(instant: OffsetDateTime) -> Timestamp {
    let millis = instant.unix_timestamp_nanos() / 1_000_000;
    Timestamp::UnixMillis(i64::try_from(millis).unwrap_or(i64::MAX))
}

/// Opens a file for appending, creating parent directories.
fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

// ============================================================================
// SECTION: Offline Commands
// ============================================================================

/// Executes the `datapoints` command.
fn command_datapoints(command: &DatapointsCommand) -> CliResult<ExitCode> {
    let config = resolve_config(&command.config, command.preset)?;
    let mode = command.config.mode.map_or_else(|| config.mode(), LoadMode::from);
    let profile = config
        .mode_profile(mode)
        .map_err(|err| CliError::config(t!("config.load_failed", error = err)))?;
    let sequence = generate_datapoints(&profile.plan)
        .map_err(|err| CliError::config(t!("datapoints.failed", error = err)))?;
    let levels: Vec<u64> = sequence.levels().iter().map(|level| level.get()).collect();
    let written = match command.format {
        OutputFormat::Json => {
            let json = serde_json::to_string(&levels)
                .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
            write_stdout_line(&json)
        }
        OutputFormat::Text => {
            let joined = levels.iter().map(u64::to_string).collect::<Vec<_>>().join(" ");
            write_stdout_line(&t!("datapoints.header", count = levels.len(), mode = mode))
                .and_then(|()| write_stdout_line(&joined))
        }
    };
    written.map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `evaluate` command.
fn command_evaluate(command: &EvaluateCommand) -> CliResult<ExitCode> {
    let config = resolve_config(&command.config, command.preset)?;
    let mode = command.config.mode.map_or_else(|| config.mode(), LoadMode::from);
    let profile = config
        .mode_profile(mode)
        .map_err(|err| CliError::config(t!("config.load_failed", error = err)))?;
    let summary = IterationSummary::new(command.failure_rate, command.median_latency_ms, 0, 1.0);
    summary.validate().map_err(|err| CliError::new(t!("evaluate.invalid", error = err)))?;
    let verdict = ThresholdEvaluator::new(profile.thresholds).evaluate(&summary);
    let line = match command.format {
        OutputFormat::Json => serde_json::to_string(&verdict)
            .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?,
        OutputFormat::Text => t!(
            "evaluate.result",
            mode = mode,
            acceptable = verdict.acceptable,
            must_stop = verdict.must_stop
        ),
    };
    write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    for mode in [LoadMode::Query, LoadMode::Update] {
        config
            .to_search_config(Some(mode))
            .map_err(|err| CliError::config(t!("config.load_failed", error = err)))?;
    }
    write_stdout_line(&t!(
        "config.validate.ok",
        run_name = config.run_name(),
        preset = config.search.preset.as_str(),
        mode = config.mode()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `snapshot verify`.
fn command_snapshot_verify(command: &SnapshotVerifyCommand) -> CliResult<ExitCode> {
    let bytes = read_bytes_with_limit(&command.path, MAX_SNAPSHOT_BYTES).map_err(|err| {
        let message = match err {
            ReadLimitError::Io(err) => t!(
                "input.read_failed",
                kind = t!("input.kind.snapshot"),
                path = command.path.display(),
                error = err
            ),
            ReadLimitError::TooLarge {
                size,
                limit,
            } => t!(
                "input.read_too_large",
                kind = t!("input.kind.snapshot"),
                path = command.path.display(),
                size = size,
                limit = limit
            ),
        };
        CliError::with_kind(message, FailureKind::Report)
    })?;
    let document = verify_snapshot_document(&bytes).map_err(|err| {
        CliError::with_kind(t!("snapshot.verify.failed", error = err), FailureKind::Report)
    })?;
    write_stdout_line(&t!(
        "snapshot.verify.ok",
        run_name = document.snapshot.run_name,
        state = document.snapshot.state.as_str(),
        iterations = document.snapshot.history_rps.len(),
        digest = document.digest.value
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Helpers
// ============================================================================

/// Loads configuration from disk.
fn load_config(path: Option<&Path>) -> CliResult<CapacitySearchConfig> {
    CapacitySearchConfig::load(path)
        .map_err(|err| CliError::config(t!("config.load_failed", error = err)))
}

/// Loads configuration, or uses preset defaults when only a preset is given.
fn resolve_config(args: &ConfigArgs, preset: Option<PresetArg>) -> CliResult<CapacitySearchConfig> {
    let mut config = match (&args.config, preset) {
        (None, Some(_)) => CapacitySearchConfig::default(),
        (path, _) => load_config(path.as_deref())?,
    };
    if let Some(preset) = preset {
        config.search.preset = preset.into();
    }
    Ok(config)
}

/// Resolves the active locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Writes a progress line to stderr, ignoring write failures.
fn emit_progress(message: &str) {
    let _ = write_stderr_line(message);
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns its exit code.
fn emit_error(error: &CliError) -> ExitCode {
    let _ = write_stderr_line(&error.message);
    error.exit.exit_code()
}

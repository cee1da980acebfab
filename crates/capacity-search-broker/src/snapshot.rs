// crates/capacity-search-broker/src/snapshot.rs
// ============================================================================
// Module: Snapshot Reporters
// Description: File and log reporters for per-iteration search snapshots.
// Purpose: Persist search progress durably and verifiably.
// Dependencies: capacity-search-core, serde, serde_json
// ============================================================================

//! ## Overview
//! [`FileSnapshotReporter`] rewrites one document per run after every
//! iteration, so a crash always leaves the latest complete snapshot on disk.
//! Each document carries a canonical-JSON SHA-256 digest of its snapshot;
//! [`verify_snapshot_document`] recomputes it to detect tampering or torn
//! writes. [`LogSnapshotReporter`] appends every snapshot as a JSON line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use capacity_search_core::HashDigest;
use capacity_search_core::HashError;
use capacity_search_core::OwnedSnapshot;
use capacity_search_core::ReportError;
use capacity_search_core::SearchSnapshot;
use capacity_search_core::SnapshotReporter;
use capacity_search_core::snapshot_digest;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Format identifier stamped into every snapshot document.
pub const SNAPSHOT_FORMAT: &str = "capacity-search.snapshot.v1";

/// Maximum snapshot document size accepted by verification.
pub const MAX_SNAPSHOT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Snapshot document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Document format identifier.
    pub format: String,
    /// Canonical digest of `snapshot`.
    pub digest: HashDigest,
    /// Snapshot contents.
    pub snapshot: OwnedSnapshot,
}

/// Borrowed document used when writing.
#[derive(Serialize)]
struct SnapshotDocumentRef<'a> {
    /// Document format identifier.
    format: &'static str,
    /// Canonical digest of `snapshot`.
    digest: HashDigest,
    /// Snapshot contents.
    snapshot: &'a SearchSnapshot<'a>,
}

/// Snapshot verification errors.
#[derive(Debug, Error)]
pub enum SnapshotVerifyError {
    /// The document could not be read.
    #[error("snapshot io error: {0}")]
    Io(String),
    /// The document is not valid JSON for the snapshot schema.
    #[error("snapshot parse error: {0}")]
    Parse(String),
    /// The document format identifier is unknown.
    #[error("unsupported snapshot format: {0}")]
    Format(String),
    /// The digest could not be recomputed.
    #[error("snapshot hash error: {0}")]
    Hash(String),
    /// The stored digest does not match the contents.
    #[error("snapshot digest mismatch (expected {expected}, computed {actual})")]
    DigestMismatch {
        /// Digest stored in the document.
        expected: String,
        /// Digest recomputed from the contents.
        actual: String,
    },
}

/// Parses a snapshot document and checks its digest.
///
/// # Errors
///
/// Returns [`SnapshotVerifyError`] when the document is malformed or its
/// digest does not match the snapshot contents.
pub fn verify_snapshot_document(bytes: &[u8]) -> Result<SnapshotDocument, SnapshotVerifyError> {
    let document: SnapshotDocument =
        serde_json::from_slice(bytes).map_err(|err| SnapshotVerifyError::Parse(err.to_string()))?;
    if document.format != SNAPSHOT_FORMAT {
        return Err(SnapshotVerifyError::Format(document.format));
    }
    match document.digest.verify(&document.snapshot) {
        Ok(()) => Ok(document),
        Err(HashError::Mismatch {
            expected,
            actual,
        }) => Err(SnapshotVerifyError::DigestMismatch {
            expected,
            actual,
        }),
        Err(err) => Err(SnapshotVerifyError::Hash(err.to_string())),
    }
}

/// Reads and verifies a snapshot document from disk.
///
/// # Errors
///
/// Returns [`SnapshotVerifyError`] when the file is unreadable, exceeds
/// [`MAX_SNAPSHOT_BYTES`], or fails verification.
pub fn read_snapshot_document(path: &Path) -> Result<SnapshotDocument, SnapshotVerifyError> {
    let file = File::open(path)
        .map_err(|err| SnapshotVerifyError::Io(format!("{}: {err}", path.display())))?;
    let limit = u64::try_from(MAX_SNAPSHOT_BYTES.saturating_add(1)).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    file.take(limit)
        .read_to_end(&mut bytes)
        .map_err(|err| SnapshotVerifyError::Io(err.to_string()))?;
    if bytes.len() > MAX_SNAPSHOT_BYTES {
        return Err(SnapshotVerifyError::Io(format!(
            "snapshot exceeds size limit of {MAX_SNAPSHOT_BYTES} bytes"
        )));
    }
    verify_snapshot_document(&bytes)
}

/// Serializes a snapshot into a digest-stamped document.
fn encode_document(snapshot: &SearchSnapshot<'_>) -> Result<Vec<u8>, ReportError> {
    let digest = snapshot_digest(snapshot).map_err(|err| ReportError::Serialize(err.to_string()))?;
    let document = SnapshotDocumentRef {
        format: SNAPSHOT_FORMAT,
        digest,
        snapshot,
    };
    serde_json::to_vec_pretty(&document).map_err(|err| ReportError::Serialize(err.to_string()))
}

// ============================================================================
// SECTION: File Reporter
// ============================================================================

/// Reporter writing one snapshot document per run into a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotReporter {
    /// Directory holding snapshot documents.
    output_dir: PathBuf,
}

impl FileSnapshotReporter {
    /// Creates a reporter rooted at `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the document path used for a run name.
    #[must_use]
    pub fn snapshot_path(&self, run_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", file_stem(run_name)))
    }
}

impl SnapshotReporter for FileSnapshotReporter {
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError> {
        let bytes = encode_document(snapshot)?;
        fs::create_dir_all(&self.output_dir).map_err(|err| ReportError::Io(err.to_string()))?;
        let path = self.snapshot_path(snapshot.run_name);
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|err| ReportError::Io(err.to_string()))?;
        file.write_all(&bytes).map_err(|err| ReportError::Io(err.to_string()))?;
        file.sync_all().map_err(|err| ReportError::Io(err.to_string()))?;
        drop(file);
        fs::rename(&temp_path, &path).map_err(|err| ReportError::Io(err.to_string()))
    }
}

/// Maps a run name onto a safe file stem.
fn file_stem(run_name: &str) -> String {
    let stem: String = run_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') { ch } else { '_' })
        .collect();
    if stem.is_empty() { "snapshot".to_string() } else { stem }
}

// ============================================================================
// SECTION: Log Reporter
// ============================================================================

/// Reporter appending each snapshot as one JSON line.
pub struct LogSnapshotReporter<W: Write + Send> {
    /// Output writer for snapshot lines.
    writer: Mutex<W>,
}

impl<W: Write + Send> LogSnapshotReporter<W> {
    /// Creates a log reporter over a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the reporter and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Reporter`] when the writer mutex is poisoned.
    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|_| ReportError::Reporter("snapshot log mutex poisoned".to_string()))
    }
}

impl<W: Write + Send> SnapshotReporter for LogSnapshotReporter<W> {
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError> {
        let line =
            serde_json::to_vec(snapshot).map_err(|err| ReportError::Serialize(err.to_string()))?;
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| ReportError::Reporter("snapshot log mutex poisoned".to_string()))?;
        guard.write_all(&line).map_err(|err| ReportError::Io(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| ReportError::Io(err.to_string()))?;
        guard.flush().map_err(|err| ReportError::Io(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

// ============================================================================
// SECTION: Fan-Out Reporter
// ============================================================================

/// Reporter forwarding each snapshot to several reporters in order.
///
/// Stops at the first failure.
pub struct FanOutSnapshotReporter {
    /// Downstream reporters.
    reporters: Vec<Box<dyn SnapshotReporter + Send + Sync>>,
}

impl FanOutSnapshotReporter {
    /// Creates a fan-out reporter.
    #[must_use]
    pub fn new(reporters: Vec<Box<dyn SnapshotReporter + Send + Sync>>) -> Self {
        Self {
            reporters,
        }
    }
}

impl SnapshotReporter for FanOutSnapshotReporter {
    fn write_snapshot(&self, snapshot: &SearchSnapshot<'_>) -> Result<(), ReportError> {
        self.reporters.iter().try_for_each(|reporter| reporter.write_snapshot(snapshot))
    }
}

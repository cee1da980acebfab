// crates/capacity-search-core/src/core/hashing.rs
// ============================================================================
// Module: Snapshot Digests
// Description: Content digests that seal persisted snapshots.
// Purpose: Let snapshot files be verified after the fact.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! A snapshot digest is SHA-256 over the RFC 8785 canonical JSON of the
//! snapshot, so it does not depend on field order or whitespace in the file
//! on disk. The borrowed [`SearchSnapshot`] view and its [`OwnedSnapshot`]
//! copy serialize identically and therefore share a digest: reporters seal
//! the view, verifiers check the parsed copy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::core::snapshot::OwnedSnapshot;
use crate::core::snapshot::SearchSnapshot;

// ============================================================================
// SECTION: Digest
// ============================================================================

/// Algorithm label stamped into every snapshot digest.
pub const SNAPSHOT_DIGEST_ALGORITHM: &str = "sha256";

/// Digest sealing one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm label; only [`SNAPSHOT_DIGEST_ALGORITHM`] is produced.
    pub algorithm: String,
    /// Lowercase hex digest.
    pub value: String,
}

impl HashDigest {
    /// Checks that this digest seals `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::UnsupportedAlgorithm`] for foreign labels,
    /// [`HashError::Mismatch`] when the contents changed, and
    /// [`HashError::Canonicalization`] when the snapshot cannot be encoded.
    pub fn verify(&self, snapshot: &OwnedSnapshot) -> Result<(), HashError> {
        if self.algorithm != SNAPSHOT_DIGEST_ALGORITHM {
            return Err(HashError::UnsupportedAlgorithm(self.algorithm.clone()));
        }
        let actual = seal(snapshot)?;
        if actual.value != self.value {
            return Err(HashError::Mismatch {
                expected: self.value.clone(),
                actual: actual.value,
            });
        }
        Ok(())
    }
}

/// Snapshot digest errors.
#[derive(Debug, Error)]
pub enum HashError {
    /// The snapshot could not be canonicalized.
    #[error("failed to canonicalize snapshot: {0}")]
    Canonicalization(String),
    /// The digest names an algorithm this build does not produce.
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The stored digest does not match the contents.
    #[error("snapshot digest mismatch (expected {expected}, computed {actual})")]
    Mismatch {
        /// Digest stored alongside the snapshot.
        expected: String,
        /// Digest recomputed from the contents.
        actual: String,
    },
}

// ============================================================================
// SECTION: Sealing
// ============================================================================

/// Computes the digest reporters store next to a snapshot.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when the snapshot cannot be encoded.
pub fn snapshot_digest(snapshot: &SearchSnapshot<'_>) -> Result<HashDigest, HashError> {
    seal(snapshot)
}

/// Hashes the canonical form of either snapshot representation.
fn seal<T: Serialize>(snapshot: &T) -> Result<HashDigest, HashError> {
    let canonical =
        serde_jcs::to_vec(snapshot).map_err(|err| HashError::Canonicalization(err.to_string()))?;
    let value = Sha256::digest(&canonical).iter().fold(String::with_capacity(64), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    });
    Ok(HashDigest {
        algorithm: SNAPSHOT_DIGEST_ALGORITHM.to_string(),
        value,
    })
}

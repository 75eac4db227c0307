//! Artifact state tracking via content hashing.
//!
//! Each generated artifact (a category page, template, or form) is keyed by
//! an identifier and tracked by the SHA-256 digest of its exact byte
//! content. Comparing the current content against the recorded digest — and
//! optionally against the content the engine would generate now — classifies
//! the artifact, so a regeneration pass can warn before overwriting human
//! edits instead of silently clobbering them.
//!
//! The tracker itself holds no persistence; callers store and reload the
//! record map (it is serde-serializable), and the digest function is stable
//! across processes so classifications reproduce after restarts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Classification of an artifact relative to its recorded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactStatus {
    /// No record exists for this key.
    Unknown,
    /// Current content matches the last recorded generation.
    Unchanged,
    /// Current content differs from the record but matches what the engine
    /// would generate now; regeneration already happened or is a no-op.
    ChangedBySystem,
    /// Current content matches neither the record nor the expected
    /// generation output: something other than this engine modified it.
    /// A write-capable caller must decide whether to overwrite, skip, or
    /// prompt — the engine never decides unilaterally.
    ChangedExternally,
}

/// The recorded state of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Lowercase hex SHA-256 digest of the content the engine last generated.
    pub hash: String,
}

/// Tracks content digests of generated artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTracker {
    records: BTreeMap<String, ArtifactRecord>,
}

/// Returns the lowercase hex SHA-256 digest of `content`.
///
/// This is the tracker's fixed digest function, applied to exact bytes: two
/// byte-different contents hash differently even when semantically
/// equivalent.
#[must_use]
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

impl StateTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a tracker from externally persisted records.
    #[must_use]
    pub fn from_records(records: BTreeMap<String, ArtifactRecord>) -> Self {
        Self { records }
    }

    /// The record map, for external persistence.
    #[must_use]
    pub fn records(&self) -> &BTreeMap<String, ArtifactRecord> {
        &self.records
    }

    /// Records `content` as the engine-generated state of `key` and returns
    /// its digest. An existing record for the key is replaced, never
    /// appended to.
    pub fn record(&mut self, key: impl Into<String>, content: &[u8]) -> String {
        let key = key.into();
        let hash = hash_content(content);
        debug!(artifact = %key, hash = %hash, "recorded artifact state");
        self.records.insert(key, ArtifactRecord { hash: hash.clone() });
        hash
    }

    /// Classifies `current` against the recorded state of `key`.
    ///
    /// Without an expected generation output to compare against, the
    /// possible outcomes are [`ArtifactStatus::Unknown`],
    /// [`ArtifactStatus::Unchanged`], and
    /// [`ArtifactStatus::ChangedExternally`].
    #[must_use]
    pub fn classify(&self, key: &str, current: &[u8]) -> ArtifactStatus {
        let Some(record) = self.records.get(key) else {
            return ArtifactStatus::Unknown;
        };
        if record.hash == hash_content(current) {
            ArtifactStatus::Unchanged
        } else {
            warn!(artifact = %key, "artifact content changed externally");
            ArtifactStatus::ChangedExternally
        }
    }

    /// Classifies `current` against both the recorded state of `key` and the
    /// content the engine would generate now.
    ///
    /// Matching the record wins over matching `expected`: an artifact that
    /// is still byte-identical to its last recorded generation is
    /// [`ArtifactStatus::Unchanged`] even if the expected output has since
    /// drifted.
    #[must_use]
    pub fn classify_against(
        &self,
        key: &str,
        current: &[u8],
        expected: &[u8],
    ) -> ArtifactStatus {
        let Some(record) = self.records.get(key) else {
            return ArtifactStatus::Unknown;
        };
        let current_hash = hash_content(current);
        if record.hash == current_hash {
            ArtifactStatus::Unchanged
        } else if current_hash == hash_content(expected) {
            ArtifactStatus::ChangedBySystem
        } else {
            warn!(artifact = %key, "artifact content changed externally");
            ArtifactStatus::ChangedExternally
        }
    }
}

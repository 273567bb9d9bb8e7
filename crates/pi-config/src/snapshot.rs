//! Configuration snapshots for diagnostics and reproducibility.
//!
//! A snapshot captures which files a run resolved and their content hashes,
//! so a prediction can later be tied to the exact artifacts behind it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::resolve::{ArtifactPaths, ConfigPaths, ConfigSource};

/// Fingerprint of one resolved file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFingerprint {
    /// Logical name: model, scaler, encoder, baseline or settings.
    pub name: String,

    /// Resolved path, if any.
    #[serde(default)]
    pub path: Option<String>,

    /// Where the path came from.
    pub source: String,

    /// SHA-256 of the file contents; None when the file is absent or unreadable.
    #[serde(default)]
    pub sha256: Option<String>,
}

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Fingerprint of the trait layout this binary was built with.
    pub layout_hash: String,

    /// Model, scaler and encoder, in that order.
    pub artifacts: Vec<FileFingerprint>,

    pub baseline: FileFingerprint,

    pub settings: FileFingerprint,

    /// Combined hash of all files (for quick comparison).
    pub combined_hash: String,
}

impl ConfigSnapshot {
    /// Create a new snapshot by hashing every resolved file.
    pub fn new(artifacts: &ArtifactPaths, config: &ConfigPaths) -> Self {
        let artifacts: Vec<FileFingerprint> = artifacts
            .iter()
            .map(|a| fingerprint(a.kind.as_str(), Some(&a.path), &a.source))
            .collect();
        let baseline = fingerprint(
            "baseline",
            config.baseline.as_deref(),
            &config.baseline_source,
        );
        let settings = fingerprint(
            "settings",
            config.settings.as_deref(),
            &config.settings_source,
        );

        let combined = artifacts
            .iter()
            .chain([&baseline, &settings])
            .map(|f| f.sha256.as_deref().unwrap_or("none"))
            .collect::<Vec<_>>()
            .join(":");

        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            layout_hash: pi_common::layout_hash(),
            artifacts,
            baseline,
            settings,
            combined_hash: hash_content(combined.as_bytes()),
        }
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this snapshot matches another (same files, same contents).
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.combined_hash == other.combined_hash
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        &self.combined_hash[..12.min(self.combined_hash.len())]
    }
}

fn fingerprint(name: &str, path: Option<&Path>, source: &ConfigSource) -> FileFingerprint {
    FileFingerprint {
        name: name.to_string(),
        path: path.map(|p| p.display().to_string()),
        source: source.to_string(),
        sha256: path.and_then(hash_file),
    }
}

/// SHA-256 of a file's bytes as lowercase hex.
pub fn hash_file(path: &Path) -> Option<String> {
    std::fs::read(path).ok().map(|bytes| hash_content(&bytes))
}

/// Hash content with SHA-256 and return hex string.
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

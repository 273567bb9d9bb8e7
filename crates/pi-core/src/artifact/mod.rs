//! Classifier artifacts: scaler, linear model and label encoder.
//!
//! The three files are loaded and validated together. The outcome is held
//! in an [`ArtifactHandle`] for the life of the process: a failed load is
//! never retried, and every request against an unavailable handle gets the
//! same `ArtifactUnavailable` error.

pub mod encoder;
pub mod model;
pub mod scaler;

pub use encoder::LabelEncoder;
pub use model::{LinearClassifier, ModelType, MultiClass};
pub use scaler::StandardScaler;

use chrono::{DateTime, Utc};
use pi_common::layout::first_layout_divergence;
use pi_common::{layout_hash, Error, Result, TRAIT_COUNT, TRAIT_NAMES};
use pi_config::snapshot::hash_content;
use pi_config::{ArtifactKind, ArtifactPaths, ResolvedArtifact};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logging::event_names;

/// Where one artifact file came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactFile {
    pub kind: String,
    /// None for artifacts built in memory.
    pub path: Option<String>,
    pub source: Option<String>,
    pub sha256: Option<String>,
}

/// Provenance of a loaded artifact triple.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactProvenance {
    /// Model, scaler and encoder, in that order.
    pub files: Vec<ArtifactFile>,
    pub loaded_at: DateTime<Utc>,
    pub model_architecture: String,
    /// Layout fingerprint the artifacts were validated against.
    pub layout_hash: String,
}

/// A jointly validated scaler, model and encoder.
#[derive(Debug, Clone)]
pub struct ClassifierArtifact {
    scaler: StandardScaler,
    model: LinearClassifier,
    encoder: LabelEncoder,
    provenance: ArtifactProvenance,
}

impl ClassifierArtifact {
    /// Assemble from in-memory parts.
    pub fn new(scaler: StandardScaler, model: LinearClassifier, encoder: LabelEncoder) -> Result<Self> {
        let files = ArtifactKind::ALL
            .iter()
            .map(|kind| ArtifactFile {
                kind: kind.as_str().to_string(),
                path: None,
                source: None,
                sha256: None,
            })
            .collect();
        Self::assemble(scaler, model, encoder, files)
    }

    /// Read, parse and validate all three files.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let (model_text, model_file) = read_artifact(&paths.model)?;
        let (scaler_text, scaler_file) = read_artifact(&paths.scaler)?;
        let (encoder_text, encoder_file) = read_artifact(&paths.encoder)?;

        let model = LinearClassifier::from_json(&model_text)?;
        let scaler = StandardScaler::from_json(&scaler_text)?;
        let encoder = LabelEncoder::from_json(&encoder_text)?;

        Self::assemble(scaler, model, encoder, vec![model_file, scaler_file, encoder_file])
    }

    fn assemble(
        scaler: StandardScaler,
        model: LinearClassifier,
        encoder: LabelEncoder,
        files: Vec<ArtifactFile>,
    ) -> Result<Self> {
        check_layout("scaler", scaler.n_features(), scaler.feature_names())?;
        check_layout("model", model.n_features(), model.feature_names())?;
        if model.n_classes() != encoder.len() {
            return Err(Error::ArtifactCorrupt {
                kind: "encoder".to_string(),
                message: format!(
                    "encoder lists {} classes but the model scores {}",
                    encoder.len(),
                    model.n_classes()
                ),
            });
        }

        let provenance = ArtifactProvenance {
            files,
            loaded_at: Utc::now(),
            model_architecture: model.architecture().to_string(),
            layout_hash: layout_hash(),
        };
        Ok(ClassifierArtifact {
            scaler,
            model,
            encoder,
            provenance,
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &LinearClassifier {
        &self.model
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn provenance(&self) -> &ArtifactProvenance {
        &self.provenance
    }

    /// Class names in index order.
    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn model_architecture(&self) -> &str {
        &self.provenance.model_architecture
    }
}

fn read_artifact(resolved: &ResolvedArtifact) -> Result<(String, ArtifactFile)> {
    let bytes = std::fs::read(&resolved.path).map_err(|e| Error::ArtifactUnavailable {
        reason: format!(
            "{} ({}): {}",
            resolved.kind.default_filename(),
            resolved.path.display(),
            e
        ),
    })?;
    let sha256 = hash_content(&bytes);
    let text = String::from_utf8(bytes).map_err(|e| Error::ArtifactCorrupt {
        kind: resolved.kind.as_str().to_string(),
        message: e.to_string(),
    })?;
    let file = ArtifactFile {
        kind: resolved.kind.as_str().to_string(),
        path: Some(resolved.path.display().to_string()),
        source: Some(resolved.source.to_string()),
        sha256: Some(sha256),
    };
    Ok((text, file))
}

/// Feature count must be 26 and any recorded feature names must follow the
/// canonical order exactly.
fn check_layout(kind: &str, n_features: usize, names: Option<&[String]>) -> Result<()> {
    if n_features != TRAIT_COUNT {
        return Err(Error::shape_with_detail(
            TRAIT_COUNT,
            n_features,
            format!("{} was fitted on {} features", kind, n_features),
        ));
    }
    if let Some(names) = names {
        if let Some(i) = first_layout_divergence(names) {
            let found = names.get(i).map(String::as_str).unwrap_or("<none>");
            let expected = TRAIT_NAMES.get(i).copied().unwrap_or("<none>");
            return Err(Error::shape_with_detail(
                TRAIT_COUNT,
                names.len(),
                format!(
                    "{} feature {} is '{}', expected '{}'",
                    kind, i, found, expected
                ),
            ));
        }
    }
    Ok(())
}

/// Process-wide artifact load outcome.
#[derive(Debug, Clone)]
pub enum ArtifactHandle {
    Loaded(Arc<ClassifierArtifact>),
    Unavailable {
        reason: String,
        /// Files that did not exist at load time.
        missing: Vec<ArtifactKind>,
        /// Code of the error that caused the failure.
        cause_code: u32,
    },
}

impl ArtifactHandle {
    /// Load once. Never panics; a failure is captured in the handle.
    pub fn load(paths: &ArtifactPaths) -> Self {
        let missing = paths.missing();
        let outcome = if missing.is_empty() {
            ClassifierArtifact::load(paths)
        } else {
            let names: Vec<String> = missing
                .iter()
                .map(|k| format!("{} ({})", k.default_filename(), paths.get(*k).path.display()))
                .collect();
            Err(Error::ArtifactUnavailable {
                reason: format!("not found: {}", names.join(", ")),
            })
        };

        match outcome {
            Ok(artifact) => {
                tracing::info!(
                    target: "pi_core::artifact",
                    event = event_names::ARTIFACT_LOADED,
                    architecture = artifact.model_architecture(),
                    classes = artifact.classes().len(),
                    "Classifier artifacts loaded"
                );
                ArtifactHandle::Loaded(Arc::new(artifact))
            }
            Err(err) => {
                tracing::warn!(
                    target: "pi_core::artifact",
                    event = event_names::ARTIFACT_UNAVAILABLE,
                    code = err.code(),
                    "Classifier artifacts unavailable: {}",
                    err
                );
                Self::unavailable(&err, missing)
            }
        }
    }

    pub fn from_artifact(artifact: ClassifierArtifact) -> Self {
        ArtifactHandle::Loaded(Arc::new(artifact))
    }

    /// Record a load failure.
    pub fn unavailable(err: &Error, missing: Vec<ArtifactKind>) -> Self {
        let reason = match err {
            Error::ArtifactUnavailable { reason } => reason.clone(),
            other => other.to_string(),
        };
        ArtifactHandle::Unavailable {
            reason,
            missing,
            cause_code: err.code(),
        }
    }

    /// The loaded artifact, or `ArtifactUnavailable` with the cached reason.
    pub fn artifact(&self) -> Result<&Arc<ClassifierArtifact>> {
        match self {
            ArtifactHandle::Loaded(artifact) => Ok(artifact),
            ArtifactHandle::Unavailable { reason, .. } => Err(Error::ArtifactUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ArtifactHandle::Loaded(_))
    }

    pub fn status(&self) -> ArtifactStatus {
        match self {
            ArtifactHandle::Loaded(artifact) => ArtifactStatus {
                available: true,
                model_architecture: Some(artifact.model_architecture().to_string()),
                classes: artifact.classes().to_vec(),
                provenance: Some(artifact.provenance().clone()),
                reason: None,
                missing: Vec::new(),
                cause_code: None,
            },
            ArtifactHandle::Unavailable {
                reason,
                missing,
                cause_code,
            } => ArtifactStatus {
                available: false,
                model_architecture: None,
                classes: Vec::new(),
                provenance: None,
                reason: Some(reason.clone()),
                missing: missing.iter().map(|k| k.as_str().to_string()).collect(),
                cause_code: Some(*cause_code),
            },
        }
    }
}

/// Serializable summary of a handle, reported by `check`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<ArtifactProvenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_code: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture_artifact, fixture_classes, write_fixture_artifacts};
    use std::path::Path;

    #[test]
    fn fixture_assembles() {
        let artifact = fixture_artifact();
        assert_eq!(artifact.classes(), fixture_classes().as_slice());
        assert_eq!(artifact.model_architecture(), "LogisticRegression_Multinomial");
        assert_eq!(artifact.provenance().files.len(), 3);
        assert!(artifact.provenance().files.iter().all(|f| f.path.is_none()));
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let scaler = StandardScaler::new(vec![0.0; 25], vec![1.0; 25]).unwrap();
        let base = fixture_artifact();
        let err = ClassifierArtifact::new(scaler, base.model().clone(), base.encoder().clone())
            .unwrap_err();
        assert_eq!(err.code(), 22);
        assert!(err.to_string().contains("expected 26 features, got 25"));
    }

    #[test]
    fn rejects_misordered_feature_names() {
        let mut names: Vec<String> = TRAIT_NAMES.iter().map(|s| s.to_string()).collect();
        names.swap(3, 4);
        let base = fixture_artifact();
        let scaler = base.scaler().clone().with_feature_names(names);
        let err = ClassifierArtifact::new(scaler, base.model().clone(), base.encoder().clone())
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
        assert!(err.to_string().contains("feature 3"));
    }

    #[test]
    fn rejects_class_count_mismatch() {
        let base = fixture_artifact();
        let encoder = LabelEncoder::new(vec!["A".to_string(), "B".to_string()]).unwrap();
        let err = ClassifierArtifact::new(base.scaler().clone(), base.model().clone(), encoder)
            .unwrap_err();
        assert_eq!(err.code(), 31);
    }

    #[test]
    fn handle_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());
        let handle = ArtifactHandle::load(&ArtifactPaths::in_dir(dir.path()));
        assert!(handle.is_available());
        let artifact = handle.artifact().unwrap();
        for file in &artifact.provenance().files {
            assert_eq!(file.sha256.as_ref().map(String::len), Some(64));
        }
    }

    #[test]
    fn handle_caches_missing_files() {
        let handle = ArtifactHandle::load(&ArtifactPaths::in_dir(Path::new("/nonexistent/pi-artifacts")));
        assert!(!handle.is_available());
        for _ in 0..3 {
            match handle.artifact() {
                Err(Error::ArtifactUnavailable { reason }) => assert!(reason.contains("model.json")),
                other => panic!("expected ArtifactUnavailable, got {:?}", other.map(|_| ())),
            }
        }
        let status = handle.status();
        assert_eq!(status.missing, vec!["model", "scaler", "encoder"]);
        assert_eq!(status.cause_code, Some(30));
    }

    #[test]
    fn corrupt_file_becomes_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());
        std::fs::write(dir.path().join("scaler.json"), "{not json").unwrap();
        let handle = ArtifactHandle::load(&ArtifactPaths::in_dir(dir.path()));
        let err = handle.artifact().unwrap_err();
        assert_eq!(err.code(), 30);
        assert!(err.to_string().contains("scaler"));
        assert_eq!(handle.status().cause_code, Some(31));
    }

    #[test]
    fn handle_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArtifactHandle>();
    }
}

//! Inference over a process-wide artifact handle.

use pi_common::Result;
use pi_config::ArtifactPaths;
use std::sync::Arc;

use super::pipeline;
use super::result::PredictionResult;
use crate::artifact::{ArtifactHandle, ClassifierArtifact};
use crate::collect::TraitVector;
use crate::logging::event_names;

/// Serves predictions from a handle loaded once at startup.
///
/// While the handle is unavailable every call returns the same
/// `ArtifactUnavailable` error; nothing is reloaded.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    handle: ArtifactHandle,
}

impl InferenceEngine {
    pub fn new(handle: ArtifactHandle) -> Self {
        InferenceEngine { handle }
    }

    /// Resolve-and-load convenience for the host.
    pub fn load(paths: &ArtifactPaths) -> Self {
        Self::new(ArtifactHandle::load(paths))
    }

    pub fn handle(&self) -> &ArtifactHandle {
        &self.handle
    }

    pub fn is_available(&self) -> bool {
        self.handle.is_available()
    }

    pub fn artifact(&self) -> Result<&Arc<ClassifierArtifact>> {
        self.handle.artifact()
    }

    pub fn predict(&self, traits: &TraitVector) -> Result<PredictionResult> {
        let outcome = self
            .handle
            .artifact()
            .and_then(|artifact| pipeline::predict_vector(traits, artifact));
        log_outcome(&outcome);
        outcome
    }

    /// Predict from raw features, shape-checked first.
    pub fn predict_features(&self, features: &[f64]) -> Result<PredictionResult> {
        let outcome = self
            .handle
            .artifact()
            .and_then(|artifact| pipeline::predict(features, artifact));
        log_outcome(&outcome);
        outcome
    }
}

fn log_outcome(outcome: &Result<PredictionResult>) {
    match outcome {
        Ok(result) => tracing::debug!(
            target: "pi_core::inference",
            event = event_names::INFER_FINISHED,
            class = result.predicted_class.as_str(),
            confidence = result.confidence,
            latency_ms = result.latency_ms,
            "Prediction ready"
        ),
        Err(err) => tracing::warn!(
            target: "pi_core::inference",
            event = event_names::INFER_FAILED,
            code = err.code(),
            "Prediction failed: {}",
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_handle;
    use pi_common::{Error, TRAIT_COUNT};
    use std::path::Path;

    #[test]
    fn predicts_through_handle() {
        let engine = InferenceEngine::new(fixture_handle());
        assert!(engine.is_available());
        let result = engine.predict(&TraitVector::uniform(5).unwrap()).unwrap();
        assert_eq!(result.predicted_class, "Ambivert");
    }

    #[test]
    fn unavailable_engine_keeps_answering() {
        let engine = InferenceEngine::load(&ArtifactPaths::in_dir(Path::new("/nonexistent/pi-engine")));
        let v = TraitVector::uniform(5).unwrap();
        for _ in 0..5 {
            assert!(matches!(
                engine.predict(&v),
                Err(Error::ArtifactUnavailable { .. })
            ));
        }
        assert!(matches!(
            engine.predict_features(&[5.0; TRAIT_COUNT]),
            Err(Error::ArtifactUnavailable { .. })
        ));
    }

    #[test]
    fn raw_features_are_shape_checked() {
        let engine = InferenceEngine::new(fixture_handle());
        assert!(matches!(
            engine.predict_features(&[5.0; 3]),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}

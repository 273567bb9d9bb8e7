//! The pure prediction pipeline: scale, classify, decode.

use chrono::Utc;
use pi_common::{Error, Result, TRAIT_COUNT};
use pi_math::{argmax, round2, round3};
use std::time::Instant;

use super::result::{ClassProbability, PredictionResult};
use crate::artifact::ClassifierArtifact;
use crate::collect::TraitVector;

/// Run one raw feature vector through the artifact.
///
/// The length is checked before anything else and is never padded or
/// truncated. Identical input against the same artifact yields a
/// bit-identical distribution.
pub fn predict(vector: &[f64], artifact: &ClassifierArtifact) -> Result<PredictionResult> {
    if vector.len() != TRAIT_COUNT {
        return Err(Error::shape(TRAIT_COUNT, vector.len()));
    }
    let traits = TraitVector::from_features(vector)?;
    predict_vector(&traits, artifact)
}

/// Run a collected trait vector through the artifact.
pub fn predict_vector(traits: &TraitVector, artifact: &ClassifierArtifact) -> Result<PredictionResult> {
    let start = Instant::now();
    let features = traits.as_features();

    let scaled = artifact.scaler().transform(&features)?;
    let probabilities = artifact.model().predict_proba(&scaled)?;
    let classes = artifact.classes();
    if probabilities.len() != classes.len() {
        return Err(Error::Inference(format!(
            "model returned {} probabilities for {} classes",
            probabilities.len(),
            classes.len()
        )));
    }

    let class_index = argmax(&probabilities)
        .ok_or_else(|| Error::Inference("empty probability vector".to_string()))?;
    let predicted_class = artifact.encoder().decode(class_index)?.to_string();
    let confidence = round2(probabilities[class_index] * 100.0);

    debug_assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-6);

    let distribution = classes
        .iter()
        .zip(&probabilities)
        .map(|(class, &probability)| ClassProbability {
            class: class.clone(),
            probability,
        })
        .collect();

    Ok(PredictionResult {
        predicted_class,
        class_index,
        distribution,
        confidence,
        timestamp: Utc::now(),
        traits: *traits,
        latency_ms: round3(start.elapsed().as_secs_f64() * 1000.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::MultiClass;
    use crate::test_utils::{fixture_artifact, fixture_encoder, fixture_model, fixture_scaler};

    #[test]
    fn midpoint_predicts_ambivert() {
        let result = predict(&[5.0; TRAIT_COUNT], &fixture_artifact()).unwrap();
        assert_eq!(result.predicted_class, "Ambivert");
        assert_eq!(result.class_index, 0);
        assert!(result.confidence > 33.33 && result.confidence <= 100.0);
        let sum: f64 = result.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn high_social_scores_predict_extrovert() {
        let mut v = [5.0; TRAIT_COUNT];
        v[0] = 10.0;
        v[2] = 10.0;
        v[4] = 10.0;
        v[5] = 0.0;
        let result = predict(&v, &fixture_artifact()).unwrap();
        assert_eq!(result.predicted_class, "Extrovert");
    }

    #[test]
    fn wrong_length_is_shape_mismatch() {
        for len in [0, 25, 27] {
            let err = predict(&vec![5.0; len], &fixture_artifact()).unwrap_err();
            match err {
                Error::ShapeMismatch {
                    expected, actual, ..
                } => {
                    assert_eq!(expected, TRAIT_COUNT);
                    assert_eq!(actual, len);
                }
                other => panic!("expected ShapeMismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn confidence_is_rounded_percentage() {
        let result = predict(&[7.0; TRAIT_COUNT], &fixture_artifact()).unwrap();
        let max = result
            .probabilities()
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.confidence, round2(max * 100.0));
    }

    #[test]
    fn ovr_distribution_is_normalized() {
        let artifact = ClassifierArtifact::new(
            fixture_scaler(),
            fixture_model(MultiClass::Ovr),
            fixture_encoder(),
        )
        .unwrap();
        let result = predict(&[3.0; TRAIT_COUNT], &artifact).unwrap();
        let sum: f64 = result.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(result.distribution.len(), 3);
    }

    #[test]
    fn deterministic() {
        let artifact = fixture_artifact();
        let a = predict(&[8.0; TRAIT_COUNT], &artifact).unwrap();
        let b = predict(&[8.0; TRAIT_COUNT], &artifact).unwrap();
        assert_eq!(a.probabilities(), b.probabilities());
        assert_eq!(a.predicted_class, b.predicted_class);
    }
}

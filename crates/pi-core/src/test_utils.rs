//! Test utilities for pi-core.
//!
//! This module provides test infrastructure including:
//! - Common assertions
//! - A small three-class classifier fixture, in memory or on disk

use std::path::Path;

use pi_common::{TRAIT_COUNT, TRAIT_MIDPOINT};

use crate::artifact::{
    ArtifactHandle, ClassifierArtifact, LabelEncoder, LinearClassifier, MultiClass,
    StandardScaler,
};

// ============================================================================
// Macros
// ============================================================================

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that two floating point numbers are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        $crate::assert_approx_eq!($a, $b, 1e-6_f64)
    };
    ($a:expr, $b:expr, $epsilon:expr) => {{
        let a: f64 = $a;
        let b: f64 = $b;
        let eps: f64 = $epsilon;
        let diff = (a - b).abs();
        if diff > eps {
            panic!(
                "assertion failed: `(left ~= right)` (left: `{}`, right: `{}`, diff: `{}`, epsilon: `{}`)",
                a, b, diff, eps
            );
        }
    }};
}

// ============================================================================
// Classifier fixture
// ============================================================================

/// Coefficients of the "Extrovert" row. Indices 0 and 5 share magnitude 0.9,
/// as do 2 and 19 at 0.6.
pub const EXTROVERT_ROW: [f64; TRAIT_COUNT] = [
    0.9, -0.7, 0.6, 0.3, 0.5, -0.9, 0.2, 0.1, 0.4, // social
    0.05, -0.1, 0.15, 0.0, 0.1, -0.05, 0.2, 0.1, 0.0, // cognitive
    0.3, 0.6, 0.25, 0.35, -0.2, 0.1, 0.45, 0.15, // action
];

/// Intercepts: the all-midpoint vector scales to zero, so Ambivert wins there.
pub const FIXTURE_INTERCEPTS: [f64; 3] = [0.5, 0.0, 0.0];

pub fn fixture_classes() -> Vec<String> {
    ["Ambivert", "Extrovert", "Introvert"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn fixture_scaler() -> StandardScaler {
    StandardScaler::new(vec![TRAIT_MIDPOINT as f64; TRAIT_COUNT], vec![2.0; TRAIT_COUNT])
        .expect("fixture scaler is valid")
}

/// Ambivert scores only its intercept; Introvert mirrors Extrovert.
pub fn fixture_model(multi_class: MultiClass) -> LinearClassifier {
    let extrovert = EXTROVERT_ROW.to_vec();
    let introvert: Vec<f64> = EXTROVERT_ROW.iter().map(|w| -w).collect();
    LinearClassifier::new(
        multi_class,
        vec![vec![0.0; TRAIT_COUNT], extrovert, introvert],
        FIXTURE_INTERCEPTS.to_vec(),
    )
    .expect("fixture model is valid")
}

pub fn fixture_encoder() -> LabelEncoder {
    LabelEncoder::new(fixture_classes()).expect("fixture encoder is valid")
}

/// Multinomial three-class artifact.
pub fn fixture_artifact() -> ClassifierArtifact {
    ClassifierArtifact::new(
        fixture_scaler(),
        fixture_model(MultiClass::Multinomial),
        fixture_encoder(),
    )
    .expect("fixture artifact is valid")
}

pub fn fixture_handle() -> ArtifactHandle {
    ArtifactHandle::from_artifact(fixture_artifact())
}

/// Write `model.json`, `scaler.json` and `encoder.json` into `dir`.
pub fn write_fixture_artifacts(dir: &Path) {
    write_artifacts(dir, &fixture_model(MultiClass::Multinomial));
}

/// Same as [`write_fixture_artifacts`] with a caller-chosen model.
pub fn write_artifacts(dir: &Path, model: &LinearClassifier) {
    let write = |name: &str, value: String| {
        std::fs::write(dir.join(name), value).expect("write fixture artifact");
    };
    write(
        "model.json",
        serde_json::to_string_pretty(model).expect("serialize model"),
    );
    write(
        "scaler.json",
        serde_json::to_string_pretty(&fixture_scaler()).expect("serialize scaler"),
    );
    write(
        "encoder.json",
        serde_json::to_string_pretty(&fixture_encoder()).expect("serialize encoder"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0, 1.0 + 1e-9);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.0, 1.1);
    }

    #[test]
    fn fixture_model_shape() {
        let model = fixture_model(MultiClass::Ovr);
        assert_eq!(model.n_classes(), 3);
        assert_eq!(model.n_features(), TRAIT_COUNT);
    }
}

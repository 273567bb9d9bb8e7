//! Shared fixtures for pi-core integration tests.
//!
//! A three-class classifier whose behaviour is easy to reason about:
//! the scaler centres on the midpoint, Ambivert carries only an intercept,
//! and Introvert mirrors Extrovert.

#![allow(dead_code)]

use assert_cmd::Command;
use pi_common::{TRAIT_COUNT, TRAIT_MIDPOINT};
use pi_core::artifact::{
    ClassifierArtifact, LabelEncoder, LinearClassifier, MultiClass, StandardScaler,
};
use std::path::Path;

/// Indices 0 and 5 tie at magnitude 0.9, indices 2 and 19 at 0.6.
pub const EXTROVERT_ROW: [f64; TRAIT_COUNT] = [
    0.9, -0.7, 0.6, 0.3, 0.5, -0.9, 0.2, 0.1, 0.4, //
    0.05, -0.1, 0.15, 0.0, 0.1, -0.05, 0.2, 0.1, 0.0, //
    0.3, 0.6, 0.25, 0.35, -0.2, 0.1, 0.45, 0.15,
];

pub const CLASSES: [&str; 3] = ["Ambivert", "Extrovert", "Introvert"];

/// Get a Command for the pi-core binary with a clean environment.
pub fn pi_core() -> Command {
    let mut cmd = Command::cargo_bin("pi-core").expect("pi-core binary should exist");
    for var in [
        "PI_ARTIFACT_DIR",
        "PI_MODEL_PATH",
        "PI_SCALER_PATH",
        "PI_ENCODER_PATH",
        "PI_BASELINE",
        "PI_SETTINGS",
        "PI_CONFIG_DIR",
        "PI_LOG",
        "PI_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    // Keep XDG lookups away from the developer's real config.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("pi-core-tests-no-config"));
    cmd
}

pub fn scaler() -> StandardScaler {
    StandardScaler::new(vec![TRAIT_MIDPOINT as f64; TRAIT_COUNT], vec![2.0; TRAIT_COUNT])
        .expect("scaler")
}

pub fn model(multi_class: MultiClass) -> LinearClassifier {
    let introvert: Vec<f64> = EXTROVERT_ROW.iter().map(|w| -w).collect();
    LinearClassifier::new(
        multi_class,
        vec![vec![0.0; TRAIT_COUNT], EXTROVERT_ROW.to_vec(), introvert],
        vec![0.5, 0.0, 0.0],
    )
    .expect("model")
}

pub fn encoder() -> LabelEncoder {
    LabelEncoder::new(CLASSES.iter().map(|s| s.to_string()).collect()).expect("encoder")
}

pub fn artifact(multi_class: MultiClass) -> ClassifierArtifact {
    ClassifierArtifact::new(scaler(), model(multi_class), encoder()).expect("artifact")
}

/// Two-class artifact with a single coefficient row favouring "Extrovert".
pub fn binary_artifact() -> ClassifierArtifact {
    let model = LinearClassifier::new(
        MultiClass::Multinomial,
        vec![EXTROVERT_ROW.to_vec()],
        vec![0.0],
    )
    .expect("binary model");
    let encoder = LabelEncoder::new(vec!["Introvert".to_string(), "Extrovert".to_string()])
        .expect("binary encoder");
    ClassifierArtifact::new(scaler(), model, encoder).expect("binary artifact")
}

/// Write model.json, scaler.json and encoder.json into `dir`.
pub fn write_artifacts(dir: &Path, multi_class: MultiClass) {
    write_json(&dir.join("model.json"), &model(multi_class));
    write_json(&dir.join("scaler.json"), &scaler());
    write_json(&dir.join("encoder.json"), &encoder());
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) {
    let text = serde_json::to_string_pretty(value).expect("serialize fixture");
    std::fs::write(path, text).expect("write fixture");
}

/// 26 scores at the midpoint except the given overrides.
pub fn scores_with(overrides: &[(usize, u8)]) -> [u8; TRAIT_COUNT] {
    let mut scores = [TRAIT_MIDPOINT; TRAIT_COUNT];
    for &(i, v) in overrides {
        scores[i] = v;
    }
    scores
}

/// Outgoing and assertive: lands on Extrovert.
pub fn extrovert_scores() -> [u8; TRAIT_COUNT] {
    scores_with(&[(0, 10), (2, 10), (4, 10), (5, 0)])
}

/// Space-separated score line for `--scores` and the repl.
pub fn score_line(scores: &[u8]) -> String {
    scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

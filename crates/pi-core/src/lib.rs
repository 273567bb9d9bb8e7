//! Personality Inference Core Library
//!
//! This library provides the core functionality for personality inference:
//! - Trait collection and validation at the input boundary
//! - Classifier artifact loading (scaler, linear model, label encoder)
//! - The prediction pipeline and caller-owned session state
//! - Display analytics: domain averages, coefficient ranking, baseline deltas
//! - JSON/CSV export
//! - Exit codes, logging and output rendering for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod analytics;
pub mod artifact;
pub mod collect;
pub mod exit_codes;
pub mod export;
pub mod inference;
pub mod logging;
pub mod output;
pub mod schema;
pub mod session;

pub use artifact::{ArtifactHandle, ClassifierArtifact};
pub use collect::{TraitCollector, TraitVector};
pub use inference::{InferenceEngine, PredictionResult};
pub use session::Session;

#[cfg(test)]
pub mod test_utils;

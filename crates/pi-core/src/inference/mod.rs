//! Inference engine modules.

pub mod engine;
pub mod pipeline;
pub mod result;

pub use engine::InferenceEngine;
pub use pipeline::{predict, predict_vector};
pub use result::{ClassProbability, PredictionResult, TIMESTAMP_FORMAT};

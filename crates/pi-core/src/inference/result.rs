//! Prediction output types.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::collect::TraitVector;

/// Display format for capture timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Probability assigned to one class.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ClassProbability {
    pub class: String,
    pub probability: f64,
}

/// Outcome of one successful inference call.
///
/// `distribution` is aligned with the encoder's class order, sums to 1 and
/// `predicted_class` is the class with the highest probability.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub class_index: usize,
    pub distribution: Vec<ClassProbability>,
    /// Highest class probability as a percentage, 2 decimals.
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    /// The vector the prediction was made from.
    #[schemars(with = "BTreeMap<String, u8>")]
    pub traits: TraitVector,
    /// Wall time spent in the pipeline, 3 decimals.
    pub latency_ms: f64,
}

impl PredictionResult {
    /// Probabilities in class order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.distribution.iter().map(|c| c.probability).collect()
    }

    pub fn probability_of(&self, class: &str) -> Option<f64> {
        self.distribution
            .iter()
            .find(|c| c.class == class)
            .map(|c| c.probability)
    }

    pub fn timestamp_display(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Classes by descending probability; equal probabilities keep class order.
    pub fn ranked_distribution(&self) -> Vec<&ClassProbability> {
        let mut ranked: Vec<&ClassProbability> = self.distribution.iter().collect();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked
    }
}

//! Command output documents.

use chrono::{DateTime, Utc};
use pi_common::{Result, SessionId, SCHEMA_VERSION};
use pi_config::GlobalBaseline;
use schemars::JsonSchema;
use serde::Serialize;

use crate::analytics::{
    baseline_deltas, baseline_domain_averages, domain_averages, top_k_importance, DomainAverages,
    FeatureWeight, TraitDelta,
};
use crate::artifact::ClassifierArtifact;
use crate::inference::PredictionResult;

/// Everything `predict` shows for one result.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PredictionReport {
    pub schema_version: String,
    pub session_id: SessionId,
    pub generated_at: DateTime<Utc>,
    pub model_architecture: String,
    pub prediction: PredictionResult,
    pub domains: DomainAverages,
    pub baseline_domains: DomainAverages,
    /// Strongest coefficients toward the predicted class.
    pub top_features: Vec<FeatureWeight>,
    pub deltas: Vec<TraitDelta>,
}

impl PredictionReport {
    pub fn build(
        session_id: &SessionId,
        artifact: &ClassifierArtifact,
        prediction: PredictionResult,
        baseline: &GlobalBaseline,
        top_k: usize,
    ) -> Result<Self> {
        let top_features = top_k_importance(artifact, prediction.class_index, top_k)?;
        Ok(PredictionReport {
            schema_version: SCHEMA_VERSION.to_string(),
            session_id: session_id.clone(),
            generated_at: Utc::now(),
            model_architecture: artifact.model_architecture().to_string(),
            domains: domain_averages(&prediction.traits),
            baseline_domains: baseline_domain_averages(baseline),
            deltas: baseline_deltas(&prediction.traits, baseline),
            top_features,
            prediction,
        })
    }
}

/// Coefficient ranking for one class, from `explain`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ExplainReport {
    pub schema_version: String,
    pub model_architecture: String,
    pub class: String,
    pub class_index: usize,
    pub k: usize,
    pub features: Vec<FeatureWeight>,
}

impl ExplainReport {
    pub fn build(artifact: &ClassifierArtifact, class_index: usize, k: usize) -> Result<Self> {
        let class = artifact.encoder().decode(class_index)?.to_string();
        Ok(ExplainReport {
            schema_version: SCHEMA_VERSION.to_string(),
            model_architecture: artifact.model_architecture().to_string(),
            class,
            class_index,
            k,
            features: top_k_importance(artifact, class_index, k)?,
        })
    }
}

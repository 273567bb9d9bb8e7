//! The JSON export document.

use pi_common::{Result, SessionId};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::collect::TraitVector;
use crate::inference::PredictionResult;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ExportMetadata {
    pub session_id: SessionId,
    /// `%Y-%m-%d %H:%M:%S UTC`.
    pub timestamp: String,
    pub model_architecture: String,
    /// Confidence as a percentage, 2 decimals.
    pub confidence_score: f64,
}

/// Exported prediction:
///
/// ```json
/// {
///     "metadata": {
///         "session_id": "3F9A1C0B",
///         "timestamp": "2024-03-09 14:05:07 UTC",
///         "model_architecture": "LogisticRegression_OvR",
///         "confidence_score": 87.41
///     },
///     "classification": "Extrovert",
///     "cognitive_vectors": { "Social Energy": 8, ... }
/// }
/// ```
///
/// `cognitive_vectors` keeps canonical trait order.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ExportPayload {
    pub metadata: ExportMetadata,
    pub classification: String,
    #[schemars(with = "BTreeMap<String, u8>")]
    pub cognitive_vectors: TraitVector,
}

impl ExportPayload {
    pub fn new(session_id: &SessionId, result: &PredictionResult, model_architecture: &str) -> Self {
        ExportPayload {
            metadata: ExportMetadata {
                session_id: session_id.clone(),
                timestamp: result.timestamp_display(),
                model_architecture: model_architecture.to_string(),
                confidence_score: result.confidence,
            },
            classification: result.predicted_class.clone(),
            cognitive_vectors: result.traits,
        }
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

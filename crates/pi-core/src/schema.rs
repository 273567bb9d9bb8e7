//! JSON Schema generation for output types.
//!
//! # Usage
//!
//! ```bash
//! # List available schema types
//! pi-core schema --list
//!
//! # Generate schema for a specific type
//! pi-core schema PredictionReport
//!
//! # Generate all schemas
//! pi-core schema --all
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::analytics::{DomainAverages, FeatureWeight, TraitDelta};
pub use crate::artifact::{ArtifactProvenance, ArtifactStatus};
pub use crate::export::{ExportMetadata, ExportPayload};
pub use crate::inference::{ClassProbability, PredictionResult};
pub use crate::output::{ExplainReport, PredictionReport};
pub use pi_common::{Domain, LayoutInfo, SessionId};

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("SessionId", "8-character session identifier"),
        ("Domain", "Trait grouping for aggregate display"),
        ("LayoutInfo", "Canonical trait layout and fingerprint"),
        ("ClassProbability", "Probability assigned to one class"),
        ("PredictionResult", "Outcome of one inference call"),
        ("DomainAverages", "Mean score per domain"),
        ("FeatureWeight", "Coefficient of one trait toward a class"),
        ("TraitDelta", "Trait score against the population baseline"),
        ("PredictionReport", "Full predict command output"),
        ("ExplainReport", "Coefficient ranking for one class"),
        ("ExportMetadata", "Metadata block of the JSON export"),
        ("ExportPayload", "JSON export document"),
        ("ArtifactProvenance", "Loaded artifact files and hashes"),
        ("ArtifactStatus", "Artifact load outcome reported by check"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns the schema as a serde_json::Value, or None if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "SessionId" => schema_for!(SessionId),
        "Domain" => schema_for!(Domain),
        "LayoutInfo" => schema_for!(LayoutInfo),
        "ClassProbability" => schema_for!(ClassProbability),
        "PredictionResult" => schema_for!(PredictionResult),
        "DomainAverages" => schema_for!(DomainAverages),
        "FeatureWeight" => schema_for!(FeatureWeight),
        "TraitDelta" => schema_for!(TraitDelta),
        "PredictionReport" => schema_for!(PredictionReport),
        "ExplainReport" => schema_for!(ExplainReport),
        "ExportMetadata" => schema_for!(ExportMetadata),
        "ExportPayload" => schema_for!(ExportPayload),
        "ArtifactProvenance" => schema_for!(ArtifactProvenance),
        "ArtifactStatus" => schema_for!(ArtifactStatus),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    let mut schemas = BTreeMap::new();
    for (name, _desc) in available_schemas() {
        if let Some(schema) = generate_schema(name) {
            schemas.insert(name.to_string(), schema);
        }
    }
    schemas
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema(schema: &Value, format: SchemaFormat) -> String {
    let rendered = match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    };
    rendered.unwrap_or_default()
}

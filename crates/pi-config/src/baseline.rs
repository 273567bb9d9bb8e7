//! Global baseline table.
//!
//! One population reference value per trait. Deltas against the user's
//! scores and the baseline radar trace are both drawn from this table.
//!
//! On disk the table is a JSON object keyed by trait name:
//!
//! ```json
//! { "Social Energy": 6.2, "Alone Time Preference": 5.8, ... }
//! ```
//!
//! All 26 traits must be present; unknown names are rejected.

use pi_common::{trait_index, TRAIT_COUNT, TRAIT_NAMES};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;

use crate::validate::{validate_baseline, ValidationError, ValidationResult};

/// Built-in population averages, in canonical trait order.
pub const DEFAULT_BASELINE: [f64; TRAIT_COUNT] = [
    6.2, 5.8, 5.5, 6.0, 5.4, 4.8, 6.5, 7.1, 6.3, // social dynamics
    5.2, 4.5, 3.8, 7.4, 6.6, 5.9, 7.2, 6.1, 5.0, // cognitive processing
    5.7, 4.2, 4.9, 8.1, 7.5, 7.8, 6.4, 5.6, // action & lifestyle
];

/// Per-trait reference values.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBaseline {
    values: [f64; TRAIT_COUNT],
}

impl Default for GlobalBaseline {
    fn default() -> Self {
        GlobalBaseline {
            values: DEFAULT_BASELINE,
        }
    }
}

impl GlobalBaseline {
    /// Build from values in canonical order, validating bounds.
    pub fn from_values(values: [f64; TRAIT_COUNT]) -> ValidationResult<Self> {
        let baseline = GlobalBaseline { values };
        validate_baseline(&baseline)?;
        Ok(baseline)
    }

    /// Load a baseline table from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse a baseline table from a JSON string.
    pub fn parse_json(content: &str) -> ValidationResult<Self> {
        let raw: HashMap<String, f64> = serde_json::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("baseline: {}", e)))?;

        let mut values = [f64::NAN; TRAIT_COUNT];
        let mut seen = [false; TRAIT_COUNT];
        for (name, value) in &raw {
            let index =
                trait_index(name).ok_or_else(|| ValidationError::UnknownField(name.clone()))?;
            if seen[index] {
                return Err(ValidationError::SemanticError(format!(
                    "Trait '{}' listed more than once",
                    TRAIT_NAMES[index]
                )));
            }
            seen[index] = true;
            values[index] = *value;
        }

        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(ValidationError::MissingField(
                TRAIT_NAMES[missing].to_string(),
            ));
        }

        Self::from_values(values)
    }

    /// Baseline for the trait at a canonical index.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Baseline for a trait by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<f64> {
        trait_index(name).map(|i| self.values[i])
    }

    pub fn values(&self) -> &[f64; TRAIT_COUNT] {
        &self.values
    }

    /// `(trait name, baseline)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        TRAIT_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Serialize to pretty JSON in canonical order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for GlobalBaseline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRAIT_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let baseline = GlobalBaseline::default();
        assert_eq!(baseline.get("Social Energy"), Some(6.2));
        assert_eq!(baseline.get("Empathy"), Some(7.1));
        assert_eq!(baseline.get("Online Social Usage"), Some(8.1));
        assert_eq!(baseline.get("Decision Speed"), Some(5.6));
        assert_eq!(baseline.value(11), Some(3.8));
        assert_eq!(baseline.value(26), None);
    }

    #[test]
    fn test_json_preserves_canonical_order() {
        let json = GlobalBaseline::default().to_json().unwrap();
        let social = json.find("Social Energy").unwrap();
        let decision = json.find("Decision Speed").unwrap();
        assert!(social < decision);
    }

    #[test]
    fn test_parse_roundtrip() {
        let json = GlobalBaseline::default().to_json().unwrap();
        let parsed = GlobalBaseline::parse_json(&json).unwrap();
        assert_eq!(parsed, GlobalBaseline::default());
    }

    #[test]
    fn test_parse_rejects_missing_trait() {
        let err = GlobalBaseline::parse_json(r#"{"Social Energy": 5.0}"#).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "Alone Time Preference"));
    }

    #[test]
    fn test_parse_rejects_unknown_trait() {
        let err = GlobalBaseline::parse_json(r#"{"Telepathy": 5.0}"#).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField(_)));
    }

    #[test]
    fn test_out_of_range_value() {
        let mut values = DEFAULT_BASELINE;
        values[3] = 10.5;
        let err = GlobalBaseline::from_values(values).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "Deep Reflection")
        );
    }
}

//! Bijection between class indices and class names.

use pi_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// JSON form: `{"classes": ["Ambivert", "Extrovert", "Introvert"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    #[serde(alias = "classes_")]
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let encoder = LabelEncoder { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let encoder: LabelEncoder = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
        encoder.validate()?;
        Ok(encoder)
    }

    /// At least two distinct, non-empty names.
    pub fn validate(&self) -> Result<()> {
        if self.classes.len() < 2 {
            return Err(corrupt(format!(
                "need at least 2 classes, found {}",
                self.classes.len()
            )));
        }
        let mut seen = HashSet::new();
        for name in &self.classes {
            if name.trim().is_empty() {
                return Err(corrupt("empty class name".to_string()));
            }
            if !seen.insert(name.as_str()) {
                return Err(corrupt(format!("duplicate class name '{}'", name)));
            }
        }
        Ok(())
    }

    /// Class names in index order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            Error::Inference(format!(
                "class index {} out of range for {} classes",
                index,
                self.classes.len()
            ))
        })
    }

    /// Exact-match lookup; falls back to a case-insensitive match.
    pub fn encode(&self, name: &str) -> Option<usize> {
        let needle = name.trim();
        self.classes
            .iter()
            .position(|c| c == needle)
            .or_else(|| self.classes.iter().position(|c| c.eq_ignore_ascii_case(needle)))
    }
}

fn corrupt(message: String) -> Error {
    Error::ArtifactCorrupt {
        kind: "encoder".to_string(),
        message,
    }
}

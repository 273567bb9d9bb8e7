//! Per-feature z-score standardization.

use pi_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fitted standard scaler: `(x - mean) / scale` per feature.
///
/// JSON form: `{"mean": [...], "scale": [...], "feature_names": [...]}`.
/// The trailing-underscore attribute names of a fitted estimator
/// (`mean_`, `scale_`, `feature_names_in_`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(alias = "mean_")]
    mean: Vec<f64>,
    #[serde(alias = "scale_")]
    scale: Vec<f64>,
    #[serde(default, alias = "feature_names_in_", skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = StandardScaler {
            mean,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Parse and validate from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let scaler: StandardScaler = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
        scaler.validate()?;
        Ok(scaler)
    }

    /// Internal consistency: equal lengths, finite means, positive finite scales.
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.scale.len() {
            return Err(corrupt(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(corrupt(format!("mean[{}] is not finite", i)));
        }
        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s <= 0.0) {
            return Err(corrupt(format!(
                "scale[{}] = {} must be positive and finite",
                i, self.scale[i]
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(corrupt(format!(
                    "{} feature names for {} features",
                    names.len(),
                    self.mean.len()
                )));
            }
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Standardize one sample.
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.n_features() {
            return Err(Error::shape(self.n_features(), x.len()));
        }
        Ok(x.iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((v, m), s)| (v - m) / s)
            .collect())
    }
}

fn corrupt(message: String) -> Error {
    Error::ArtifactCorrupt {
        kind: "scaler".to_string(),
        message,
    }
}

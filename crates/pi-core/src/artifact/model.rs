//! Fitted linear multi-class classifier (logistic regression).
//!
//! Decision values are `coef · x + intercept` per row. Probabilities follow
//! the fitted multi-class strategy:
//!
//! | Rows | Strategy     | `predict_proba`                                  |
//! |------|--------------|--------------------------------------------------|
//! | 1    | binary       | `[1 - σ(z), σ(z)]`                               |
//! | k    | multinomial  | `softmax(z)`                                     |
//! | k    | ovr          | `σ(z_i) / Σ σ(z_j)`                              |

use pi_common::{Error, Result};
use pi_math::{argmax, dot, logistic, normalize, softmax};
use serde::{Deserialize, Serialize};

/// How per-class scores become a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// Only logistic regression is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    #[default]
    #[serde(alias = "LogisticRegression")]
    LogisticRegression,
}

/// JSON form:
/// `{"model_type": "logistic_regression", "multi_class": "ovr", "coef": [[...]], "intercept": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    #[serde(default)]
    model_type: ModelType,
    #[serde(default)]
    multi_class: MultiClass,
    #[serde(alias = "coef_")]
    coef: Vec<Vec<f64>>,
    #[serde(alias = "intercept_")]
    intercept: Vec<f64>,
    #[serde(default, alias = "feature_names_in_", skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl LinearClassifier {
    pub fn new(multi_class: MultiClass, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let model = LinearClassifier {
            model_type: ModelType::LogisticRegression,
            multi_class,
            coef,
            intercept,
            feature_names: None,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Parse and validate from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let model: LinearClassifier =
            serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Internal consistency: non-empty rectangular finite coefficients, one
    /// intercept per row.
    pub fn validate(&self) -> Result<()> {
        let n_features = match self.coef.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(corrupt("coef is empty".to_string())),
        };
        for (r, row) in self.coef.iter().enumerate() {
            if row.len() != n_features {
                return Err(corrupt(format!(
                    "coef row {} has {} entries, expected {}",
                    r,
                    row.len(),
                    n_features
                )));
            }
            if let Some(c) = row.iter().position(|w| !w.is_finite()) {
                return Err(corrupt(format!("coef[{}][{}] is not finite", r, c)));
            }
        }
        if self.intercept.len() != self.coef.len() {
            return Err(corrupt(format!(
                "{} intercepts for {} coef rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        if let Some(i) = self.intercept.iter().position(|b| !b.is_finite()) {
            return Err(corrupt(format!("intercept[{}] is not finite", i)));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != n_features {
                return Err(corrupt(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n_features
                )));
            }
        }
        Ok(())
    }

    /// A single coefficient row encodes a two-class model.
    pub fn is_binary(&self) -> bool {
        self.coef.len() == 1
    }

    pub fn n_classes(&self) -> usize {
        if self.is_binary() {
            2
        } else {
            self.coef.len()
        }
    }

    pub fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    pub fn multi_class(&self) -> MultiClass {
        self.multi_class
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Human-readable architecture tag, e.g. `LogisticRegression_OvR`.
    pub fn architecture(&self) -> &'static str {
        match (self.is_binary(), self.multi_class) {
            (true, _) => "LogisticRegression_Binary",
            (false, MultiClass::Multinomial) => "LogisticRegression_Multinomial",
            (false, MultiClass::Ovr) => "LogisticRegression_OvR",
        }
    }

    /// Raw per-row scores.
    pub fn decision_function(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.n_features() {
            return Err(Error::shape(self.n_features(), x.len()));
        }
        let mut scores = Vec::with_capacity(self.coef.len());
        for (row, b) in self.coef.iter().zip(&self.intercept) {
            let z = dot(row, x).ok_or_else(|| Error::shape(row.len(), x.len()))? + b;
            if !z.is_finite() {
                return Err(Error::NumericalInstability(format!(
                    "decision value {} for row {}",
                    z,
                    scores.len()
                )));
            }
            scores.push(z);
        }
        Ok(scores)
    }

    /// Probability distribution over classes, in class-index order.
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        let z = self.decision_function(x)?;
        let proba = if self.is_binary() {
            let p1 = logistic(z[0]);
            Some(vec![1.0 - p1, p1])
        } else {
            match self.multi_class {
                MultiClass::Multinomial => softmax(&z),
                MultiClass::Ovr => {
                    let raw: Vec<f64> = z.iter().map(|&v| logistic(v)).collect();
                    normalize(&raw)
                }
            }
        };
        proba.ok_or_else(|| {
            Error::NumericalInstability("class probabilities could not be normalized".to_string())
        })
    }

    /// Index of the most probable class; ties resolve to the lowest index.
    pub fn predict(&self, x: &[f64]) -> Result<usize> {
        let proba = self.predict_proba(x)?;
        argmax(&proba).ok_or_else(|| Error::Inference("empty probability vector".to_string()))
    }

    /// Per-feature weights pushing toward `class_index`.
    ///
    /// For a binary model the single row favours class 1, so class 0 gets
    /// the negated row.
    pub fn coefficients(&self, class_index: usize) -> Result<Vec<f64>> {
        if class_index >= self.n_classes() {
            return Err(Error::Inference(format!(
                "class index {} out of range for {} classes",
                class_index,
                self.n_classes()
            )));
        }
        if self.is_binary() {
            let row = &self.coef[0];
            return Ok(if class_index == 1 {
                row.clone()
            } else {
                row.iter().map(|w| -w).collect()
            });
        }
        Ok(self.coef[class_index].clone())
    }
}

fn corrupt(message: String) -> Error {
    Error::ArtifactCorrupt {
        kind: "model".to_string(),
        message,
    }
}

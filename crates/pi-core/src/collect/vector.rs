//! The immutable 26-score trait vector.

use pi_common::{Error, Result, TRAIT_COUNT, TRAIT_MAX, TRAIT_NAMES};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Exactly 26 scores in canonical trait order, each in [0, 10].
///
/// Constructed only through validating constructors, so holders may
/// assume every score is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraitVector {
    scores: [u8; TRAIT_COUNT],
}

impl TraitVector {
    /// Build from scores in canonical order.
    pub fn new(scores: [u8; TRAIT_COUNT]) -> Result<Self> {
        if let Some(i) = scores.iter().position(|&s| s > TRAIT_MAX) {
            return Err(out_of_range(i, scores[i] as f64));
        }
        Ok(TraitVector { scores })
    }

    /// Every trait set to the same score.
    pub fn uniform(score: u8) -> Result<Self> {
        Self::new([score; TRAIT_COUNT])
    }

    /// Build from integer scores of any length; wrong length is a shape error.
    pub fn from_slice(scores: &[u8]) -> Result<Self> {
        let array: [u8; TRAIT_COUNT] = scores
            .try_into()
            .map_err(|_| Error::shape(TRAIT_COUNT, scores.len()))?;
        Self::new(array)
    }

    /// Build from raw feature values.
    ///
    /// Length is checked first, so a wrong-length vector is always a shape
    /// error. Each value must then be an integer in [0, 10].
    pub fn from_features(features: &[f64]) -> Result<Self> {
        if features.len() != TRAIT_COUNT {
            return Err(Error::shape(TRAIT_COUNT, features.len()));
        }
        let mut scores = [0u8; TRAIT_COUNT];
        for (i, &value) in features.iter().enumerate() {
            if !value.is_finite() || value.fract() != 0.0 || !(0.0..=TRAIT_MAX as f64).contains(&value)
            {
                return Err(out_of_range(i, value));
            }
            scores[i] = value as u8;
        }
        Ok(TraitVector { scores })
    }

    pub fn scores(&self) -> &[u8; TRAIT_COUNT] {
        &self.scores
    }

    /// Score for a trait by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<u8> {
        pi_common::trait_index(name).map(|i| self.scores[i])
    }

    /// `(trait name, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        TRAIT_NAMES.iter().copied().zip(self.scores.iter().copied())
    }

    /// Scores as classifier input features.
    pub fn as_features(&self) -> [f64; TRAIT_COUNT] {
        self.scores.map(f64::from)
    }
}

fn out_of_range(index: usize, value: f64) -> Error {
    Error::InvalidInput {
        trait_name: TRAIT_NAMES[index].to_string(),
        message: format!("{} is not an integer score in [0, {}]", value, TRAIT_MAX),
    }
}

/// Serialized as `{ "Social Energy": 7, ... }` in canonical order.
impl Serialize for TraitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRAIT_COUNT))?;
        for (name, score) in self.iter() {
            map.serialize_entry(name, &score)?;
        }
        map.end()
    }
}

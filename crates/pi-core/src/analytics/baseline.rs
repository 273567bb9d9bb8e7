//! Per-trait differences against the population baseline.

use pi_common::TRAIT_NAMES;
use pi_config::GlobalBaseline;
use pi_math::round1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collect::TraitVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TraitDelta {
    pub trait_name: String,
    pub value: u8,
    pub baseline: f64,
    /// `value - baseline`, 1 decimal.
    pub delta: f64,
}

/// One delta per trait, in canonical order.
pub fn baseline_deltas(traits: &TraitVector, baseline: &GlobalBaseline) -> Vec<TraitDelta> {
    traits
        .scores()
        .iter()
        .zip(baseline.values())
        .zip(TRAIT_NAMES)
        .map(|((&value, &base), name)| TraitDelta {
            trait_name: name.to_string(),
            value,
            baseline: base,
            delta: round1(f64::from(value) - base),
        })
        .collect()
}

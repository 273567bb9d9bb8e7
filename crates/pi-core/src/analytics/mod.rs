//! Display-only aggregates derived from a trait vector and a prediction.

pub mod baseline;
pub mod domains;
pub mod importance;

pub use baseline::{baseline_deltas, TraitDelta};
pub use domains::{baseline_domain_averages, domain_averages, domain_averages_of, DomainAverages};
pub use importance::{
    rank_by_magnitude, top_k_importance, FeatureWeight, TOP_K_COMPACT, TOP_K_DETAILED,
};

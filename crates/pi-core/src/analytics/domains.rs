//! Per-domain score averages for radar and gauge displays.

use pi_common::{Domain, Error, Result, TRAIT_COUNT};
use pi_config::GlobalBaseline;
use pi_math::mean;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collect::TraitVector;

/// Arithmetic mean of each domain's traits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DomainAverages {
    pub social: f64,
    pub cognitive: f64,
    pub action: f64,
}

impl DomainAverages {
    /// In [`Domain::ALL`] order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.social, self.cognitive, self.action]
    }

    pub fn get(&self, domain: Domain) -> f64 {
        match domain {
            Domain::SocialDynamics => self.social,
            Domain::CognitiveProcessing => self.cognitive,
            Domain::ActionLifestyle => self.action,
        }
    }

    /// `(domain, average)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, f64)> + '_ {
        Domain::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

pub fn domain_averages(traits: &TraitVector) -> DomainAverages {
    averages_of(&traits.as_features())
}

/// Same as [`domain_averages`] for a raw slice; the length must be 26.
pub fn domain_averages_of(values: &[f64]) -> Result<DomainAverages> {
    if values.len() != TRAIT_COUNT {
        return Err(Error::shape(TRAIT_COUNT, values.len()));
    }
    Ok(averages_of(values))
}

/// Domain averages of the population baseline, drawn as the comparison trace.
pub fn baseline_domain_averages(baseline: &GlobalBaseline) -> DomainAverages {
    averages_of(baseline.values())
}

fn averages_of(values: &[f64]) -> DomainAverages {
    // Every domain range is non-empty, so mean always succeeds.
    let avg = |d: Domain| mean(&values[d.range()]).unwrap_or(0.0);
    DomainAverages {
        social: avg(Domain::SocialDynamics),
        cognitive: avg(Domain::CognitiveProcessing),
        action: avg(Domain::ActionLifestyle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_and_all_ten() {
        let zero = domain_averages(&TraitVector::uniform(0).unwrap());
        assert_eq!(zero.as_array(), [0.0, 0.0, 0.0]);
        let ten = domain_averages(&TraitVector::uniform(10).unwrap());
        assert_eq!(ten.as_array(), [10.0, 10.0, 10.0]);
    }

    #[test]
    fn midpoint_vector() {
        let avg = domain_averages(&TraitVector::uniform(5).unwrap());
        assert_eq!(avg.as_array(), [5.0, 5.0, 5.0]);
    }

    #[test]
    fn domains_are_contiguous() {
        let mut scores = [0u8; TRAIT_COUNT];
        scores[..9].fill(9);
        scores[9..18].fill(3);
        scores[18..].fill(6);
        let avg = domain_averages(&TraitVector::new(scores).unwrap());
        assert_eq!(avg.social, 9.0);
        assert_eq!(avg.cognitive, 3.0);
        assert_eq!(avg.action, 6.0);
    }

    #[test]
    fn action_domain_has_eight_traits() {
        let mut scores = [0u8; TRAIT_COUNT];
        scores[25] = 8;
        let avg = domain_averages(&TraitVector::new(scores).unwrap());
        assert_eq!(avg.action, 1.0);
    }

    #[test]
    fn raw_slice_is_shape_checked() {
        assert!(matches!(
            domain_averages_of(&[1.0; 10]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert_eq!(domain_averages_of(&[2.5; TRAIT_COUNT]).unwrap().social, 2.5);
    }

    #[test]
    fn baseline_trace() {
        let avg = baseline_domain_averages(&GlobalBaseline::default());
        let expected = (6.2 + 5.8 + 5.5 + 6.0 + 5.4 + 4.8 + 6.5 + 7.1 + 6.3) / 9.0;
        assert!((avg.social - expected).abs() < 1e-12);
        assert_eq!(avg.iter().count(), 3);
    }
}

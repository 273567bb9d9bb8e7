//! Ranked feature importance from classifier coefficients.

use pi_common::{Result, TRAIT_NAMES};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::artifact::ClassifierArtifact;

/// Entries shown in the detailed importance chart.
pub const TOP_K_DETAILED: usize = 15;

/// Entries shown in the compact chart.
pub const TOP_K_COMPACT: usize = 8;

/// One trait's coefficient toward a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureWeight {
    pub trait_name: String,
    /// Canonical index of the trait.
    pub index: usize,
    /// Signed coefficient; positive pushes toward the class.
    pub weight: f64,
    pub magnitude: f64,
}

/// Indices of the `k` largest magnitudes, descending.
///
/// The sort is stable, so equal magnitudes keep ascending index order.
pub fn rank_by_magnitude(weights: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].abs().total_cmp(&weights[a].abs()));
    order.truncate(k);
    order
}

/// Top `k` traits by absolute coefficient for `class_index`.
pub fn top_k_importance(
    artifact: &ClassifierArtifact,
    class_index: usize,
    k: usize,
) -> Result<Vec<FeatureWeight>> {
    let coefficients = artifact.model().coefficients(class_index)?;
    Ok(rank_by_magnitude(&coefficients, k)
        .into_iter()
        .map(|i| FeatureWeight {
            trait_name: TRAIT_NAMES[i].to_string(),
            index: i,
            weight: coefficients[i],
            magnitude: coefficients[i].abs(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_artifact;
    use pi_common::{Error, TRAIT_COUNT};

    #[test]
    fn ties_keep_canonical_order() {
        assert_eq!(rank_by_magnitude(&[0.5, -0.9, 0.9, 0.1], 3), vec![1, 2, 0]);
        assert_eq!(rank_by_magnitude(&[1.0, 1.0, 1.0], 2), vec![0, 1]);
    }

    #[test]
    fn fixture_ranking() {
        let top = top_k_importance(&fixture_artifact(), 1, TOP_K_COMPACT).unwrap();
        assert_eq!(top.len(), TOP_K_COMPACT);
        assert_eq!(top[0].trait_name, "Social Energy");
        assert_eq!(top[1].trait_name, TRAIT_NAMES[5]);
        assert_eq!(top[1].weight, -0.9);
        assert_eq!(top[1].magnitude, 0.9);
        assert_eq!(top[2].index, 1);
        // 0.6 shared by indices 2 and 19.
        assert_eq!(top[3].index, 2);
        assert_eq!(top[4].index, 19);
    }

    #[test]
    fn large_k_returns_every_trait() {
        let top = top_k_importance(&fixture_artifact(), 2, 100).unwrap();
        assert_eq!(top.len(), TRAIT_COUNT);
        for pair in top.windows(2) {
            assert!(pair[0].magnitude >= pair[1].magnitude);
        }
    }

    #[test]
    fn detailed_view_has_fifteen() {
        let top = top_k_importance(&fixture_artifact(), 1, TOP_K_DETAILED).unwrap();
        assert_eq!(top.len(), 15);
    }

    #[test]
    fn unknown_class_is_an_error() {
        assert!(matches!(
            top_k_importance(&fixture_artifact(), 3, 5),
            Err(Error::Inference(_))
        ));
    }
}

//! Canonical trait layout.
//!
//! This is the single source of truth for feature order. The collector,
//! the artifact compatibility check, the analytics and the exporters all
//! index through these constants.
//!
//! Rules:
//! 1. Adding, removing or reordering a trait increments `TRAIT_LAYOUT_VERSION`.
//! 2. Domains are contiguous index ranges over this order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ops::Range;

/// Current trait layout version.
pub const TRAIT_LAYOUT_VERSION: u8 = 1;

/// Number of traits in a vector.
pub const TRAIT_COUNT: usize = 26;

/// Lowest admissible trait score.
pub const TRAIT_MIN: u8 = 0;

/// Highest admissible trait score.
pub const TRAIT_MAX: u8 = 10;

/// Midpoint score used by interactive front-ends as a slider default.
pub const TRAIT_MIDPOINT: u8 = 5;

/// Trait names in the exact order the classifier was fitted on.
pub const TRAIT_NAMES: [&str; TRAIT_COUNT] = [
    // === Social Dynamics (0-8) ===
    "Social Energy",
    "Alone Time Preference",
    "Talkativeness",
    "Deep Reflection",
    "Group Comfort",
    "Party Liking",
    "Listening Skill",
    "Empathy",
    "Organization",
    // === Cognitive Processing (9-17) ===
    "Leadership",
    "Risk Taking",
    "Public Speaking Comfort",
    "Curiosity",
    "Routine Preference",
    "Excitement Seeking",
    "Friendliness",
    "Planning",
    "Spontaneity",
    // === Action & Lifestyle (18-25) ===
    "Adventurousness",
    "Reading Habit",
    "Sports Interest",
    "Online Social Usage",
    "Travel Desire",
    "Gadget Usage",
    "Collaborative Work Style",
    "Decision Speed",
];

/// One-line descriptions shown next to each score input.
pub const TRAIT_DESCRIPTIONS: [&str; TRAIT_COUNT] = [
    "Capacity to sustain high energy levels in dense social environments without fatigue.",
    "Psychological need for isolated recovery time to recharge cognitive resources.",
    "Baseline volume and frequency of verbal output in standard human interactions.",
    "Tendency to engage in prolonged, complex internal philosophical or theoretical thought.",
    "Level of psychological ease and natural functioning when operating within large groups.",
    "Affinity for large, unstructured, and high-stimulus social gatherings.",
    "Ability to actively absorb, process, and retain others' verbal input.",
    "Capacity to naturally mirror and intuitively understand the emotional states of others.",
    "Inherent preference for highly structured environments, systems, and taxonomies.",
    "Natural inclination to take charge, direct group outcomes, and assume responsibility.",
    "Willingness to act aggressively in scenarios with high outcome uncertainty.",
    "Level of psychological ease vs. anxiety when formally addressing an audience.",
    "Internal drive to acquire new, novel knowledge or conceptual experiences.",
    "Reliance on predictable, repeating daily scheduling for psychological comfort.",
    "Dopaminergic drive to pursue high-adrenaline or highly novel experiences.",
    "Baseline outward warmth, approachability, and pro-social signaling.",
    "Tendency to map out future actions and contingencies rather than improvising.",
    "Comfort and adaptability with sudden, unpredicted changes to plans or environment.",
    "Willingness to physically or conceptually explore completely unfamiliar territories.",
    "Frequency of engaging with long-form, complex written content.",
    "Affinity for physical competition, athletics, and kinetic output.",
    "Frequency of and reliance on digital social networks for human connection.",
    "Urge to frequently change geographical locations and experience foreign cultures.",
    "Reliance on, and interest in, adopting new hardware and software technologies.",
    "Preference for team-based, cooperative projects over solo execution.",
    "Velocity of committing to a choice when presented with multiple complex options.",
];

/// Look up a trait's canonical index.
///
/// Matching ignores ASCII case and surrounding whitespace, so
/// `" empathy "` resolves to `"Empathy"`.
pub fn trait_index(name: &str) -> Option<usize> {
    let needle = name.trim();
    TRAIT_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(needle))
}

/// Whether a score lies inside the admissible closed interval.
pub fn score_in_range(score: i64) -> bool {
    (TRAIT_MIN as i64..=TRAIT_MAX as i64).contains(&score)
}

/// Fingerprint of the layout: SHA-256 over version and names, first 16 hex chars.
pub fn layout_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update([TRAIT_LAYOUT_VERSION]);
    for name in TRAIT_NAMES {
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
    }
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

/// Check an externally supplied feature-name list against the canonical order.
///
/// Returns the first position where the lists disagree, or None if they match.
pub fn first_layout_divergence<S: AsRef<str>>(names: &[S]) -> Option<usize> {
    for (i, expected) in TRAIT_NAMES.iter().enumerate() {
        match names.get(i) {
            Some(actual) if actual.as_ref() == *expected => {}
            _ => return Some(i),
        }
    }
    if names.len() > TRAIT_COUNT {
        return Some(TRAIT_COUNT);
    }
    None
}

/// One of the three fixed groupings of traits used for aggregate display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Traits 0-8.
    SocialDynamics,
    /// Traits 9-17.
    CognitiveProcessing,
    /// Traits 18-25.
    ActionLifestyle,
}

impl Domain {
    /// All domains in layout order.
    pub const ALL: [Domain; 3] = [
        Domain::SocialDynamics,
        Domain::CognitiveProcessing,
        Domain::ActionLifestyle,
    ];

    /// Index range of this domain within the trait layout.
    pub fn range(self) -> Range<usize> {
        match self {
            Domain::SocialDynamics => 0..9,
            Domain::CognitiveProcessing => 9..18,
            Domain::ActionLifestyle => 18..TRAIT_COUNT,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Domain::SocialDynamics => "Social Dynamics",
            Domain::CognitiveProcessing => "Cognitive Processing",
            Domain::ActionLifestyle => "Action & Lifestyle",
        }
    }

    /// Names of the traits in this domain.
    pub fn traits(self) -> &'static [&'static str] {
        &TRAIT_NAMES[self.range()]
    }

    /// Domain that owns the trait at `index`.
    pub fn of_index(index: usize) -> Option<Domain> {
        Domain::ALL.into_iter().find(|d| d.range().contains(&index))
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Complete layout information for serialization and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: String,
    pub trait_count: usize,
    pub trait_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: TRAIT_LAYOUT_VERSION,
            hash: layout_hash(),
            trait_count: TRAIT_COUNT,
            trait_names: TRAIT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn layout_has_26_unique_names() {
        assert_eq!(TRAIT_NAMES.len(), TRAIT_COUNT);
        let unique: HashSet<_> = TRAIT_NAMES.iter().collect();
        assert_eq!(unique.len(), TRAIT_COUNT);
    }

    #[test]
    fn layout_order_is_pinned() {
        assert_eq!(TRAIT_NAMES[0], "Social Energy");
        assert_eq!(TRAIT_NAMES[7], "Empathy");
        assert_eq!(TRAIT_NAMES[10], "Risk Taking");
        assert_eq!(TRAIT_NAMES[25], "Decision Speed");
    }

    #[test]
    fn descriptions_align_with_names() {
        assert_eq!(TRAIT_DESCRIPTIONS.len(), TRAIT_NAMES.len());
        assert!(TRAIT_DESCRIPTIONS.iter().all(|d| !d.is_empty()));
    }

    #[test]
    fn trait_index_is_case_insensitive() {
        assert_eq!(trait_index("Empathy"), Some(7));
        assert_eq!(trait_index("  empathy "), Some(7));
        assert_eq!(trait_index("DECISION SPEED"), Some(25));
        assert_eq!(trait_index("Telepathy"), None);
    }

    #[test]
    fn score_bounds() {
        assert!(score_in_range(0));
        assert!(score_in_range(10));
        assert!(!score_in_range(-1));
        assert!(!score_in_range(11));
    }

    #[test]
    fn layout_hash_is_stable() {
        let a = layout_hash();
        let b = layout_hash();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn divergence_detection() {
        let names: Vec<String> = TRAIT_NAMES.iter().map(|s| s.to_string()).collect();
        assert_eq!(first_layout_divergence(&names), None);

        let mut swapped = names.clone();
        swapped.swap(3, 4);
        assert_eq!(first_layout_divergence(&swapped), Some(3));

        assert_eq!(first_layout_divergence(&names[..20]), Some(20));

        let mut longer = names.clone();
        longer.push("Extra".to_string());
        assert_eq!(first_layout_divergence(&longer), Some(26));
    }

    #[test]
    fn domains_partition_layout() {
        let mut covered = Vec::new();
        for d in Domain::ALL {
            covered.extend(d.range());
        }
        assert_eq!(covered, (0..TRAIT_COUNT).collect::<Vec<_>>());
        assert_eq!(Domain::SocialDynamics.traits().len(), 9);
        assert_eq!(Domain::CognitiveProcessing.traits().len(), 9);
        assert_eq!(Domain::ActionLifestyle.traits().len(), 8);
    }

    #[test]
    fn domain_of_index() {
        assert_eq!(Domain::of_index(0), Some(Domain::SocialDynamics));
        assert_eq!(Domain::of_index(9), Some(Domain::CognitiveProcessing));
        assert_eq!(Domain::of_index(25), Some(Domain::ActionLifestyle));
        assert_eq!(Domain::of_index(26), None);
    }

    #[test]
    fn domain_serialization() {
        assert_eq!(
            serde_json::to_string(&Domain::ActionLifestyle).unwrap(),
            "\"action_lifestyle\""
        );
        assert_eq!(Domain::ActionLifestyle.to_string(), "Action & Lifestyle");
    }
}

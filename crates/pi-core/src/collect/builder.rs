//! Building a trait vector from named, possibly partial input.

use pi_common::{trait_index, Error, Result, TRAIT_COUNT, TRAIT_MAX, TRAIT_NAMES};

use super::TraitVector;

/// Accumulates named scores and produces a [`TraitVector`].
///
/// Missing traits are an error unless a fill default was requested with
/// [`TraitCollector::with_default`]; that is a front-end policy, and the
/// pipeline itself never fills gaps.
#[derive(Debug, Clone, Default)]
pub struct TraitCollector {
    slots: [Option<u8>; TRAIT_COUNT],
    default: Option<u8>,
}

impl TraitCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset traits with `score` on [`collect`](Self::collect).
    pub fn with_default(mut self, score: u8) -> Self {
        self.default = Some(score);
        self
    }

    /// Set a trait by name. Later calls overwrite earlier ones.
    pub fn set(&mut self, name: &str, score: i64) -> Result<&mut Self> {
        let index = trait_index(name).ok_or_else(|| Error::InvalidInput {
            trait_name: name.trim().to_string(),
            message: "unknown trait name".to_string(),
        })?;
        self.set_index(index, score)
    }

    /// Set a trait by canonical index.
    pub fn set_index(&mut self, index: usize, score: i64) -> Result<&mut Self> {
        if index >= TRAIT_COUNT {
            return Err(Error::shape_with_detail(
                TRAIT_COUNT,
                index.saturating_add(1),
                format!("trait index {} is out of range", index),
            ));
        }
        if !pi_common::layout::score_in_range(score) {
            return Err(Error::InvalidInput {
                trait_name: TRAIT_NAMES[index].to_string(),
                message: format!("{} is outside [0, {}]", score, TRAIT_MAX),
            });
        }
        self.slots[index] = Some(score as u8);
        Ok(self)
    }

    /// Apply a `Name=value` assignment.
    pub fn apply(&mut self, assignment: &str) -> Result<&mut Self> {
        let (name, score) = parse_assignment(assignment)?;
        self.set(&name, score)
    }

    /// Set every trait present in a JSON object of `name → integer`.
    pub fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut collector = Self::new();
        for (name, value) in map {
            let score = value.as_i64().ok_or_else(|| Error::InvalidInput {
                trait_name: name.clone(),
                message: format!("expected an integer, got {}", value),
            })?;
            collector.set(name, score)?;
        }
        Ok(collector)
    }

    /// Number of traits explicitly set.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Names of traits not yet set, in canonical order.
    pub fn missing(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .zip(TRAIT_NAMES)
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, name)| name)
            .collect()
    }

    /// Produce the vector.
    ///
    /// Fails with `MissingTrait` naming the first unset trait in canonical
    /// order when no default is configured.
    pub fn collect(&self) -> Result<TraitVector> {
        let mut scores = [0u8; TRAIT_COUNT];
        for (i, slot) in self.slots.iter().enumerate() {
            scores[i] = match (slot, self.default) {
                (Some(score), _) => *score,
                (None, Some(fill)) => fill,
                (None, None) => {
                    return Err(Error::MissingTrait {
                        trait_name: TRAIT_NAMES[i].to_string(),
                    })
                }
            };
        }
        TraitVector::new(scores)
    }
}

/// Parse `"Empathy=7"` into a trait name and score.
///
/// Whitespace around either side is ignored. The name is not resolved here.
pub fn parse_assignment(input: &str) -> Result<(String, i64)> {
    let (name, value) = input.split_once('=').ok_or_else(|| Error::InvalidInput {
        trait_name: input.trim().to_string(),
        message: "expected NAME=VALUE".to_string(),
    })?;
    let name = name.trim();
    let score = value.trim().parse::<i64>().map_err(|_| Error::InvalidInput {
        trait_name: name.to_string(),
        message: format!("'{}' is not an integer", value.trim()),
    })?;
    Ok((name.to_string(), score))
}

/// Parse a line of 26 whitespace- or comma-separated integer scores.
pub fn parse_score_line(line: &str) -> Result<TraitVector> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != TRAIT_COUNT {
        return Err(Error::shape(TRAIT_COUNT, tokens.len()));
    }
    let mut collector = TraitCollector::new();
    for (i, token) in tokens.iter().enumerate() {
        let score = token.parse::<i64>().map_err(|_| Error::InvalidInput {
            trait_name: TRAIT_NAMES[i].to_string(),
            message: format!("'{}' is not an integer", token),
        })?;
        collector.set_index(i, score)?;
    }
    collector.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_collector(score: i64) -> TraitCollector {
        let mut c = TraitCollector::new();
        for name in TRAIT_NAMES {
            c.set(name, score).unwrap();
        }
        c
    }

    #[test]
    fn collects_all_traits() {
        let v = full_collector(5).collect().unwrap();
        assert_eq!(v, TraitVector::uniform(5).unwrap());
    }

    #[test]
    fn missing_trait_names_first_gap() {
        let mut c = full_collector(4);
        c.slots[3] = None;
        c.slots[10] = None;
        match c.collect() {
            Err(Error::MissingTrait { trait_name }) => assert_eq!(trait_name, "Deep Reflection"),
            other => panic!("expected MissingTrait, got {:?}", other),
        }
        assert_eq!(c.missing(), vec!["Deep Reflection", "Risk Taking"]);
    }

    #[test]
    fn default_fills_gaps_only() {
        let mut c = TraitCollector::new().with_default(5);
        c.set("empathy", 9).unwrap();
        let v = c.collect().unwrap();
        assert_eq!(v.get("Empathy"), Some(9));
        assert_eq!(v.get("Social Energy"), Some(5));
        assert_eq!(c.filled(), 1);
    }

    #[test]
    fn rejects_out_of_range_and_unknown() {
        let mut c = TraitCollector::new();
        assert!(matches!(c.set("Empathy", 11), Err(Error::InvalidInput { .. })));
        assert!(matches!(c.set("Empathy", -1), Err(Error::InvalidInput { .. })));
        assert!(matches!(c.set("Telepathy", 3), Err(Error::InvalidInput { .. })));
        assert!(matches!(c.set_index(26, 3), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn out_of_range_index_at_usize_max() {
        let mut c = TraitCollector::new();
        match c.set_index(usize::MAX, 3) {
            Err(Error::ShapeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, TRAIT_COUNT);
                assert_eq!(actual, usize::MAX);
            }
            other => panic!("expected shape mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn parse_assignment_forms() {
        assert_eq!(
            parse_assignment(" Risk Taking = 8 ").unwrap(),
            ("Risk Taking".to_string(), 8)
        );
        assert!(parse_assignment("Risk Taking").is_err());
        assert!(parse_assignment("Risk Taking=high").is_err());
    }

    #[test]
    fn json_map_input() {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"Empathy": 7, "Curiosity": 2}"#).unwrap();
        let c = TraitCollector::from_json_map(&map).unwrap();
        assert_eq!(c.filled(), 2);

        let bad: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"Empathy": 7.5}"#).unwrap();
        assert!(TraitCollector::from_json_map(&bad).is_err());
    }

    #[test]
    fn score_line_parsing() {
        let line = vec!["5"; 26].join(" ");
        assert_eq!(parse_score_line(&line).unwrap(), TraitVector::uniform(5).unwrap());

        let commas = vec!["1"; 26].join(",");
        assert_eq!(parse_score_line(&commas).unwrap().get("Planning"), Some(1));

        assert!(matches!(
            parse_score_line("1 2 3"),
            Err(Error::ShapeMismatch { actual: 3, .. })
        ));
    }
}

//! Caller-owned session state.
//!
//! A session holds at most one prediction: the last successful one. Each
//! new result replaces it. Sessions are plain values threaded through the
//! caller; nothing here is global, and two sessions never share results.

use chrono::{DateTime, Utc};
use pi_common::{Result, SessionId};

use crate::collect::TraitVector;
use crate::inference::{InferenceEngine, PredictionResult};
use crate::logging::event_names;

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    last: Option<PredictionResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        tracing::debug!(
            target: "pi_core::session",
            event = event_names::SESSION_STARTED,
            session_id = id.as_str(),
            "Session started"
        );
        Session {
            id,
            created_at: Utc::now(),
            last: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the cached result.
    pub fn record(&mut self, result: PredictionResult) -> &PredictionResult {
        tracing::debug!(
            target: "pi_core::session",
            event = event_names::SESSION_RECORDED,
            session_id = self.id.as_str(),
            class = result.predicted_class.as_str(),
            "Result cached"
        );
        self.last.insert(result)
    }

    pub fn last(&self) -> Option<&PredictionResult> {
        self.last.as_ref()
    }

    /// Drop the cached result, returning it.
    pub fn clear(&mut self) -> Option<PredictionResult> {
        tracing::debug!(
            target: "pi_core::session",
            event = event_names::SESSION_CLEARED,
            session_id = self.id.as_str(),
            "Session cleared"
        );
        self.last.take()
    }

    /// Predict and cache on success. A failed prediction leaves the
    /// previous result in place.
    pub fn run(&mut self, engine: &InferenceEngine, traits: &TraitVector) -> Result<&PredictionResult> {
        let result = engine.predict(traits)?;
        Ok(self.record(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactHandle;
    use crate::test_utils::fixture_handle;
    use pi_common::Error;

    #[test]
    fn run_replaces_last_result() {
        let engine = InferenceEngine::new(fixture_handle());
        let mut session = Session::new();
        assert!(session.last().is_none());

        session.run(&engine, &TraitVector::uniform(5).unwrap()).unwrap();
        assert_eq!(session.last().unwrap().predicted_class, "Ambivert");

        let mut scores = [5u8; 26];
        scores[0] = 10;
        scores[2] = 10;
        scores[4] = 10;
        scores[5] = 0;
        session.run(&engine, &TraitVector::new(scores).unwrap()).unwrap();
        let last = session.last().unwrap();
        assert_eq!(last.predicted_class, "Extrovert");
        assert_eq!(last.traits.scores()[0], 10);
    }

    #[test]
    fn failure_keeps_previous_result() {
        let good = InferenceEngine::new(fixture_handle());
        let bad = InferenceEngine::new(ArtifactHandle::unavailable(
            &Error::ArtifactUnavailable {
                reason: "test".to_string(),
            },
            Vec::new(),
        ));
        let mut session = Session::new();
        session.run(&good, &TraitVector::uniform(5).unwrap()).unwrap();
        assert!(session.run(&bad, &TraitVector::uniform(9).unwrap()).is_err());
        assert_eq!(session.last().unwrap().traits, TraitVector::uniform(5).unwrap());
    }

    #[test]
    fn sessions_are_independent() {
        let engine = InferenceEngine::new(fixture_handle());
        let mut a = Session::new();
        let b = Session::new();
        a.run(&engine, &TraitVector::uniform(5).unwrap()).unwrap();
        assert!(a.last().is_some());
        assert!(b.last().is_none());
    }

    #[test]
    fn clear_empties_the_cache() {
        let engine = InferenceEngine::new(fixture_handle());
        let mut session = Session::new();
        session.run(&engine, &TraitVector::uniform(5).unwrap()).unwrap();
        assert!(session.clear().is_some());
        assert!(session.last().is_none());
    }

    #[test]
    fn id_shape() {
        let session = Session::new();
        assert_eq!(session.id().as_str().len(), 8);
        assert!(session
            .id()
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}

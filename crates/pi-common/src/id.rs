//! Session identity.
//!
//! A session ID is the first 8 hex digits of a random UUID, uppercased.
//! It names export files and tags log lines, so it is short on purpose.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a session ID in characters.
pub const SESSION_ID_LEN: usize = 8;

/// Session ID for tracking one caller's prediction session.
///
/// Format: 8 characters of `[0-9A-F]`
/// Example: `3F9A1C0B`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new session ID.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let simple = uuid.simple().to_string();
        SessionId(simple[..SESSION_ID_LEN].to_ascii_uppercase())
    }

    /// Parse an existing session ID string.
    ///
    /// Lowercase hex is accepted and normalized to uppercase.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != SESSION_ID_LEN {
            return None;
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(SessionId(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

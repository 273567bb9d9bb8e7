//! Structured event definitions for logging.
//!
//! Events follow a consistent schema for machine-parseable JSONL output.
//! All events include correlation IDs (run_id, session_id) and stage.

use serde::{Deserialize, Serialize};

/// Log levels for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Processing stages in the pi-core pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Trait input collection and validation.
    Collect,
    /// Artifact loading.
    Load,
    /// Scaling, classification and decoding.
    Infer,
    /// Domain averages, coefficient ranking, baseline deltas.
    Analyze,
    /// JSON/CSV export.
    Export,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Collect => "collect",
            Stage::Load => "load",
            Stage::Infer => "infer",
            Stage::Analyze => "analyze",
            Stage::Export => "export",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Collect stage
    pub const COLLECT_FINISHED: &str = "collect.finished";
    pub const COLLECT_REJECTED: &str = "collect.rejected";
    pub const COLLECT_DEFAULT_APPLIED: &str = "collect.default_applied";

    // Load stage
    pub const ARTIFACT_LOADED: &str = "artifact.loaded";
    pub const ARTIFACT_UNAVAILABLE: &str = "artifact.unavailable";

    // Infer stage
    pub const INFER_FINISHED: &str = "infer.finished";
    pub const INFER_FAILED: &str = "infer.failed";

    // Analyze stage
    pub const ANALYZE_FINISHED: &str = "analyze.finished";

    // Export stage
    pub const EXPORT_WRITTEN: &str = "export.written";

    // Session events
    pub const SESSION_STARTED: &str = "session.started";
    pub const SESSION_RECORDED: &str = "session.recorded";
    pub const SESSION_CLEARED: &str = "session.cleared";

    // Config/init events
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";
}

/// Context for generating log events with consistent run/session IDs.
#[derive(Debug, Clone)]
pub struct LogContext {
    /// Unique ID for this invocation.
    pub run_id: String,
    /// Session ID (if a session has been created).
    pub session_id: Option<String>,
}

impl LogContext {
    /// Create a new log context.
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
            session_id: None,
        }
    }

    /// Set the session ID.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context() {
        let ctx = LogContext::new("run-abc").with_session_id("FFEE0011");
        assert_eq!(ctx.run_id, "run-abc");
        assert_eq!(ctx.session_id.as_deref(), Some("FFEE0011"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Collect.to_string(), "collect");
        assert_eq!(Stage::Analyze.to_string(), "analyze");
        assert_eq!(Stage::Export.to_string(), "export");
    }

    #[test]
    fn test_event_names() {
        assert_eq!(event_names::RUN_STARTED, "run.started");
        assert_eq!(event_names::ARTIFACT_UNAVAILABLE, "artifact.unavailable");
        assert_eq!(event_names::EXPORT_WRITTEN, "export.written");
    }
}

//! Error types for personality inference.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Classifier Artifacts Unavailable
//!   Reason: classifier artifacts unavailable: model.json: file not found
//!   Fix: Restore model.json, scaler.json and encoder.json, then restart.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 22,
//!   "category": "input",
//!   "message": "shape mismatch: expected 26 features, got 25",
//!   "recoverable": false,
//!   "suggested_action": "fix_input",
//!   "context": { "expected": 26, "actual": 25 }
//! }
//! ```
//!
//! Nothing in the inference path panics; every failure is one of these
//! variants and is converted to a message at the call site.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for personality inference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration and baseline errors.
    Config,
    /// Trait input errors caught at the collector boundary.
    Input,
    /// Classifier artifact loading errors.
    Artifact,
    /// Classification and numerical errors.
    Inference,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Artifact => write!(f, "artifact"),
            ErrorCategory::Inference => write!(f, "inference"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Suggested actions for callers to take in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Correct the trait input and submit again.
    FixInput,
    /// Repair the artifact files and restart the process.
    RestoreArtifacts,
    /// Run the validation command.
    RunCheck,
    /// Reset configuration to defaults.
    ResetConfig,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::RestoreArtifacts => write!(f, "restore_artifacts"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for personality inference.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid baseline table: {0}")]
    InvalidBaseline(String),

    // Input errors (20-29)
    #[error("invalid value for trait '{trait_name}': {message}")]
    InvalidInput { trait_name: String, message: String },

    #[error("missing value for trait '{trait_name}'")]
    MissingTrait { trait_name: String },

    #[error("shape mismatch: expected {expected} features, got {actual}{detail}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        detail: String,
    },

    // Artifact errors (30-39)
    #[error("classifier artifacts unavailable: {reason}")]
    ArtifactUnavailable { reason: String },

    #[error("corrupt {kind} artifact: {message}")]
    ArtifactCorrupt { kind: String, message: String },

    // Inference errors (40-49)
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("numerical instability detected: {0}")]
    NumericalInstability(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shape mismatch without extra detail.
    pub fn shape(expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            expected,
            actual,
            detail: String::new(),
        }
    }

    /// Shape mismatch with a trailing explanation (e.g. a misordered feature).
    pub fn shape_with_detail(expected: usize, actual: usize, detail: impl Into<String>) -> Self {
        Error::ShapeMismatch {
            expected,
            actual,
            detail: format!(" ({})", detail.into()),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Artifact errors
    /// - 40-49: Inference errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidBaseline(_) => 11,
            Error::InvalidInput { .. } => 20,
            Error::MissingTrait { .. } => 21,
            Error::ShapeMismatch { .. } => 22,
            Error::ArtifactUnavailable { .. } => 30,
            Error::ArtifactCorrupt { .. } => 31,
            Error::Inference(_) => 40,
            Error::NumericalInstability(_) => 41,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidBaseline(_) => ErrorCategory::Config,

            Error::InvalidInput { .. } | Error::MissingTrait { .. } | Error::ShapeMismatch { .. } => {
                ErrorCategory::Input
            }

            Error::ArtifactUnavailable { .. } | Error::ArtifactCorrupt { .. } => {
                ErrorCategory::Artifact
            }

            Error::Inference(_) | Error::NumericalInstability(_) => ErrorCategory::Inference,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error can be resolved without restarting the process.
    ///
    /// Artifact failures are cached for the process lifetime, so they are
    /// only recoverable by fixing the files and restarting.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidBaseline(_) => true,

            // The caller can submit a corrected vector.
            Error::InvalidInput { .. } => true,
            Error::MissingTrait { .. } => true,
            // Collector and artifact disagree on layout: a version mismatch.
            Error::ShapeMismatch { .. } => false,

            Error::ArtifactUnavailable { .. } => false,
            Error::ArtifactCorrupt { .. } => false,

            // Inference is deterministic; the same input fails the same way.
            Error::Inference(_) => false,
            Error::NumericalInstability(_) => false,

            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns the suggested action for callers.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) => SuggestedAction::RunCheck,
            Error::InvalidBaseline(_) => SuggestedAction::ResetConfig,

            Error::InvalidInput { .. } => SuggestedAction::FixInput,
            Error::MissingTrait { .. } => SuggestedAction::FixInput,
            Error::ShapeMismatch { .. } => SuggestedAction::RunCheck,

            Error::ArtifactUnavailable { .. } => SuggestedAction::RestoreArtifacts,
            Error::ArtifactCorrupt { .. } => SuggestedAction::RestoreArtifacts,

            Error::Inference(_) => SuggestedAction::ManualIntervention,
            Error::NumericalInstability(_) => SuggestedAction::ManualIntervention,

            Error::Io(_) => SuggestedAction::RunCheck,
            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'pi-core check' to validate configuration, or check syntax in settings.toml."
            }
            Error::InvalidBaseline(_) => {
                "Every trait needs a baseline value in [0, 10]. Remove baseline.json to use the built-in table."
            }
            Error::InvalidInput { .. } => {
                "Trait scores are integers from 0 to 10. List valid names with 'pi-core traits'."
            }
            Error::MissingTrait { .. } => {
                "Supply all 26 traits, or pass '--default 5' to fill the missing ones with the midpoint."
            }
            Error::ShapeMismatch { .. } => {
                "The artifacts were fitted on a different trait layout. Re-export them for the current layout."
            }
            Error::ArtifactUnavailable { .. } => {
                "Restore model.json, scaler.json and encoder.json (see 'pi-core check'), then restart."
            }
            Error::ArtifactCorrupt { .. } => {
                "Re-export the artifact file from the fitted estimator; the current file cannot be read."
            }
            Error::Inference(_) => {
                "The artifacts are internally inconsistent. Run 'pi-core check' and re-export them."
            }
            Error::NumericalInstability(_) => {
                "The classifier produced non-finite scores. Inspect the model coefficients for NaN or inf."
            }
            Error::Io(_) => "Check file paths and permissions, then retry the operation.",
            Error::Json(_) => {
                "Invalid JSON in file. Check syntax with 'cat <file> | jq .' or restore from backup."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidBaseline(_) => "Invalid Baseline Table",
            Error::InvalidInput { .. } => "Invalid Trait Input",
            Error::MissingTrait { .. } => "Missing Trait",
            Error::ShapeMismatch { .. } => "Feature Shape Mismatch",
            Error::ArtifactUnavailable { .. } => "Classifier Artifacts Unavailable",
            Error::ArtifactCorrupt { .. } => "Corrupt Classifier Artifact",
            Error::Inference(_) => "Inference Error",
            Error::NumericalInstability(_) => "Numerical Instability",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for callers.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., trait name, expected length).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidInput { trait_name, .. } | Error::MissingTrait { trait_name } => {
                context.insert("trait".to_string(), serde_json::json!(trait_name));
            }
            Error::ShapeMismatch {
                expected, actual, ..
            } => {
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("actual".to_string(), serde_json::json!(actual));
            }
            Error::ArtifactCorrupt { kind, .. } => {
                context.insert("artifact".to_string(), serde_json::json!(kind));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

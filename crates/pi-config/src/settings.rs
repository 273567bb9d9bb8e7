//! Optional `settings.toml`.
//!
//! ```toml
//! top_k = 15
//! log_format = "jsonl"
//! log_level = "debug"
//! artifact_dir = "/srv/pi/artifacts"
//! baseline_path = "/srv/pi/baseline.json"
//! ```
//!
//! Every key is optional; unknown keys are an error so typos surface early.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::validate::{validate_settings, ValidationError, ValidationResult};

/// Default number of ranked coefficients shown by `predict` and `explain`.
pub const DEFAULT_TOP_K: usize = 15;

/// User-level defaults for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// How many coefficients to rank.
    pub top_k: usize,

    /// `human` or `jsonl`; overridden by PI_LOG_FORMAT.
    pub log_format: Option<String>,

    /// Log level; overridden by PI_LOG and RUST_LOG.
    pub log_level: Option<String>,

    /// Directory holding model.json, scaler.json and encoder.json.
    pub artifact_dir: Option<PathBuf>,

    /// Baseline table; overridden by `--baseline` and PI_BASELINE.
    pub baseline_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            top_k: DEFAULT_TOP_K,
            log_format: None,
            log_level: None,
            artifact_dir: None,
            baseline_path: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut settings = Self::parse_toml(&content)?;
        settings.rebase(path.parent().unwrap_or_else(|| Path::new(".")));
        Ok(settings)
    }

    /// Parse settings from a TOML string.
    pub fn parse_toml(content: &str) -> ValidationResult<Self> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("settings: {}", e)))?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Relative paths in the file are relative to the file itself.
    fn rebase(&mut self, dir: &Path) {
        for path in [&mut self.artifact_dir, &mut self.baseline_path]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

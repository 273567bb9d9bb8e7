//! Configuration validation errors and semantic validation.

use pi_common::{TRAIT_COUNT, TRAIT_MAX, TRAIT_MIN};
use thiserror::Error;

use crate::baseline::GlobalBaseline;
use crate::settings::Settings;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::UnknownField(_) => 67,
        }
    }
}

impl From<ValidationError> for pi_common::Error {
    fn from(err: ValidationError) -> Self {
        pi_common::Error::Config(err.to_string())
    }
}

/// Validate a baseline table.
///
/// Every value must be finite and inside the trait score interval.
pub fn validate_baseline(baseline: &GlobalBaseline) -> ValidationResult<()> {
    for (name, value) in baseline.iter() {
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: name.to_string(),
                message: format!("Must be finite, got {}", value),
            });
        }
        if value < TRAIT_MIN as f64 || value > TRAIT_MAX as f64 {
            return Err(ValidationError::InvalidValue {
                field: name.to_string(),
                message: format!("Must be in [{}, {}], got {}", TRAIT_MIN, TRAIT_MAX, value),
            });
        }
    }

    Ok(())
}

/// Validate settings semantically.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    if settings.top_k == 0 || settings.top_k > TRAIT_COUNT {
        return Err(ValidationError::InvalidValue {
            field: "top_k".to_string(),
            message: format!("Must be in [1, {}], got {}", TRAIT_COUNT, settings.top_k),
        });
    }

    if let Some(format) = settings.log_format.as_deref() {
        if !matches!(format, "human" | "jsonl" | "json") {
            return Err(ValidationError::InvalidValue {
                field: "log_format".to_string(),
                message: format!("Must be one of human, jsonl; got '{}'", format),
            });
        }
    }

    if let Some(level) = settings.log_level.as_deref() {
        let known = ["error", "warn", "info", "debug", "trace"];
        if !known.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "log_level".to_string(),
                message: format!("Unknown level '{}'", level),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_baseline_is_valid() {
        validate_baseline(&GlobalBaseline::default()).unwrap();
    }

    #[test]
    fn test_default_settings_are_valid() {
        validate_settings(&Settings::default()).unwrap();
    }

    #[test]
    fn test_top_k_out_of_range() {
        let settings = Settings {
            top_k: 27,
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "top_k"));
    }

    #[test]
    fn test_bad_log_format() {
        let settings = Settings {
            log_format: Some("xml".to_string()),
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_error_codes_and_conversion() {
        let err = ValidationError::MissingField("Empathy".to_string());
        assert_eq!(err.code(), 64);
        let converted: pi_common::Error = err.into();
        assert_eq!(converted.code(), 10);
    }
}

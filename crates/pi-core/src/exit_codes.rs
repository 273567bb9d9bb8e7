//! Exit codes for the pi-core CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use pi_common::Error;

/// Exit codes for pi-core operations.
///
/// These codes are a stable contract for automation. Changes require
/// a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or configuration
    ArgsError = 10,

    /// Trait input rejected at the collector boundary
    InvalidInput = 11,

    /// Classifier artifacts missing or unreadable
    ArtifactUnavailable = 12,

    /// Vector or artifact layout disagrees with the 26-trait layout
    ShapeMismatch = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InvalidInput => "ERR_INPUT",
            ExitCode::ArtifactUnavailable => "ERR_ARTIFACT",
            ExitCode::ShapeMismatch => "ERR_SHAPE",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Exit code for an error code from [`Error::code`].
    pub fn from_error_code(code: u32) -> Self {
        match code {
            10..=19 => ExitCode::ArgsError,
            22 => ExitCode::ShapeMismatch,
            20..=29 => ExitCode::InvalidInput,
            30..=39 => ExitCode::ArtifactUnavailable,
            60..=69 => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        ExitCode::from_error_code(err.code())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

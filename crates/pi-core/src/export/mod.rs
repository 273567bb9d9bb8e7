//! Export of a prediction as JSON and CSV documents.
//!
//! Both are derived from the trait vector and the prediction alone. Files
//! are named after the session (`PIP_Payload_<id>.json`,
//! `PIP_Profile_<id>.csv`) and can also be rendered as base64 data URIs.

pub mod csv;
pub mod payload;

pub use self::csv::{csv_field, to_csv};
pub use payload::{ExportMetadata, ExportPayload};

use base64::Engine;
use pi_common::{Result, SessionId};
use std::path::Path;

use crate::logging::event_names;

/// Export document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Json,
    Csv,
}

impl ExportKind {
    pub fn mime(self) -> &'static str {
        match self {
            ExportKind::Json => "application/json",
            ExportKind::Csv => "text/csv",
        }
    }

    /// Download file name for a session.
    pub fn file_name(self, session_id: &SessionId) -> String {
        match self {
            ExportKind::Json => format!("PIP_Payload_{}.json", session_id),
            ExportKind::Csv => format!("PIP_Profile_{}.csv", session_id),
        }
    }
}

/// `data:<mime>;base64,<payload>`.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Write an export document and log it.
pub fn write_export(path: &Path, kind: ExportKind, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    tracing::info!(
        target: "pi_core::export",
        event = event_names::EXPORT_WRITTEN,
        kind = kind.mime(),
        bytes = contents.len(),
        "Wrote {}",
        path.display()
    );
    Ok(())
}

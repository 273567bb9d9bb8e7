//! Schema versioning for machine-readable output.

/// Version of the JSON documents emitted by the CLI and the exporters.
///
/// Bump on any breaking change to field names or nesting.
pub const SCHEMA_VERSION: &str = "1.0.0";

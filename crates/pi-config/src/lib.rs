//! Personality inference configuration loading and validation.
//!
//! This crate provides:
//! - Artifact path resolution (CLI → env → settings → XDG → working directory)
//! - The global baseline table used for per-trait deltas
//! - Optional `settings.toml` with display and logging defaults
//! - Semantic validation
//! - Config snapshots for `check` output

pub mod baseline;
pub mod resolve;
pub mod settings;
pub mod snapshot;
pub mod validate;

pub use baseline::GlobalBaseline;
pub use resolve::{
    resolve_artifacts, resolve_config, ArtifactKind, ArtifactOverrides, ArtifactPaths,
    ConfigPaths, ConfigSource, ResolvedArtifact,
};
pub use settings::Settings;
pub use snapshot::ConfigSnapshot;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

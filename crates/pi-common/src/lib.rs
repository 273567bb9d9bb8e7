//! Personality inference common types, IDs, and errors.
//!
//! This crate provides foundational types shared across pi-core modules:
//! - The canonical 26-trait layout and its domain partition
//! - Session identifiers and schema versioning
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod layout;
pub mod output;
pub mod schema;

pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError, SuggestedAction};
pub use id::SessionId;
pub use layout::{
    layout_hash, trait_index, Domain, LayoutInfo, TRAIT_COUNT, TRAIT_DESCRIPTIONS,
    TRAIT_LAYOUT_VERSION, TRAIT_MAX, TRAIT_MIDPOINT, TRAIT_MIN, TRAIT_NAMES,
};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;

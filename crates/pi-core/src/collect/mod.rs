//! Trait vector collection.
//!
//! Turns user input (named assignments, JSON objects, score lines) into a
//! validated [`TraitVector`]. Range and completeness checks happen here, at
//! the input boundary, so inference can assume well-formed vectors.

mod builder;
mod vector;

pub use builder::{parse_assignment, parse_score_line, TraitCollector};
pub use vector::TraitVector;

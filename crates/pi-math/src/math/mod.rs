//! Core math modules.

pub mod round;
pub mod stable;
pub mod stats;

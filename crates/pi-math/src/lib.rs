//! Personality inference math utilities.

pub mod math;

pub use math::round::*;
pub use math::stable::*;
pub use math::stats::*;

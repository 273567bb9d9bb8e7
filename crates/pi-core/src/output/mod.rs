//! Output documents and their human renderings.
//!
//! JSON output serializes the report types directly; `md` and `summary`
//! go through the renderers.

pub mod render;
pub mod report;

pub use render::{probability_bar, render_explain_markdown, render_prediction_markdown, render_summary};
pub use report::{ExplainReport, PredictionReport};

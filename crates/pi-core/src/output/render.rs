//! Markdown and one-line renderings of command output.

use std::fmt::Write;

use super::report::{ExplainReport, PredictionReport};
use crate::inference::PredictionResult;

const BAR_WIDTH: usize = 20;

/// Fixed-width bar for a probability in [0, 1].
pub fn probability_bar(probability: f64, width: usize) -> String {
    let filled = ((probability.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `[3F9A1C0B] Extrovert 87.41% (Ambivert 8.15%, Introvert 4.44%)`.
pub fn render_summary(session_id: &str, result: &PredictionResult) -> String {
    let others: Vec<String> = result
        .ranked_distribution()
        .into_iter()
        .filter(|c| c.class != result.predicted_class)
        .map(|c| format!("{} {:.2}%", c.class, c.probability * 100.0))
        .collect();
    if others.is_empty() {
        format!(
            "[{}] {} {:.2}%",
            session_id, result.predicted_class, result.confidence
        )
    } else {
        format!(
            "[{}] {} {:.2}% ({})",
            session_id,
            result.predicted_class,
            result.confidence,
            others.join(", ")
        )
    }
}

pub fn render_prediction_markdown(report: &PredictionReport) -> String {
    let result = &report.prediction;
    let mut out = String::new();

    let _ = writeln!(out, "# Prediction: {}", result.predicted_class);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Confidence: {:.2}% | Session: {} | {}",
        result.confidence,
        report.session_id,
        result.timestamp_display()
    );
    let _ = writeln!(out, "Model: {}", report.model_architecture);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Class probabilities");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Class | Probability | |");
    let _ = writeln!(out, "|---|---:|---|");
    for class in result.ranked_distribution() {
        let _ = writeln!(
            out,
            "| {} | {:.2}% | {} |",
            class.class,
            class.probability * 100.0,
            probability_bar(class.probability, BAR_WIDTH)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Domain averages");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Domain | You | Baseline |");
    let _ = writeln!(out, "|---|---:|---:|");
    for ((domain, value), (_, base)) in report.domains.iter().zip(report.baseline_domains.iter()) {
        let _ = writeln!(out, "| {} | {:.2} | {:.2} |", domain, value, base);
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "## Top {} traits toward {}",
        report.top_features.len(),
        result.predicted_class
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "| # | Trait | Weight |");
    let _ = writeln!(out, "|---:|---|---:|");
    for (rank, feature) in report.top_features.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | {:+.4} |",
            rank + 1,
            feature.trait_name,
            feature.weight
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Baseline deltas");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Trait | Score | Baseline | Delta |");
    let _ = writeln!(out, "|---|---:|---:|---:|");
    for delta in &report.deltas {
        let _ = writeln!(
            out,
            "| {} | {} | {:.1} | {:+.1} |",
            delta.trait_name, delta.value, delta.baseline, delta.delta
        );
    }
    out
}

pub fn render_explain_markdown(report: &ExplainReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Top {} traits toward {}",
        report.features.len(),
        report.class
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Model: {}", report.model_architecture);
    let _ = writeln!(out);
    let _ = writeln!(out, "| # | Trait | Weight | |");
    let _ = writeln!(out, "|---:|---|---:|---|");
    let max = report
        .features
        .first()
        .map(|f| f.magnitude)
        .filter(|m| *m > 0.0)
        .unwrap_or(1.0);
    for (rank, feature) in report.features.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | {:+.4} | {} |",
            rank + 1,
            feature.trait_name,
            feature.weight,
            probability_bar(feature.magnitude / max, BAR_WIDTH)
        );
    }
    out
}

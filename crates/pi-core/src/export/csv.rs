//! Single-row CSV of a trait vector.

use crate::collect::TraitVector;

/// Header row of the 26 trait names, then one row of scores.
/// Lines end in `\n`.
pub fn to_csv(traits: &TraitVector) -> String {
    let header: Vec<String> = traits.iter().map(|(name, _)| csv_field(name)).collect();
    let row: Vec<String> = traits.iter().map(|(_, score)| score.to_string()).collect();
    format!("{}\n{}\n", header.join(","), row.join(","))
}

/// Quote a field when it contains a comma, quote or line break (RFC 4180).
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

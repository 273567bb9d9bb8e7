//! Small descriptive statistics over f64 slices.

/// Arithmetic mean. Returns None for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Index of the largest value; ties resolve to the lowest index.
///
/// NaN entries are skipped. Returns None if there is no comparable value.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Largest value, ignoring NaN. Returns None if there is no comparable value.
pub fn max_value(values: &[f64]) -> Option<f64> {
    argmax(values).map(|i| values[i])
}

/// Dot product of two equal-length slices. Returns None on length mismatch.
pub fn dot(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    Some(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn argmax_prefers_first_on_tie() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn argmax_skips_nan() {
        assert_eq!(argmax(&[f64::NAN, 0.1, 0.3]), Some(2));
        assert_eq!(argmax(&[f64::NAN]), None);
    }

    #[test]
    fn max_value_matches_argmax() {
        assert_eq!(max_value(&[0.1, 0.7, 0.2]), Some(0.7));
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), Some(11.0));
        assert_eq!(dot(&[1.0], &[1.0, 2.0]), None);
    }
}

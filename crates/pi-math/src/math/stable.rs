//! Numerically stable primitives for turning linear scores into probabilities.

/// Stable log(sum(exp(values))).
///
/// Returns NEG_INFINITY for empty input or all -inf inputs.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NEG_INFINITY;
    }
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let mut sum = 0.0;
    for v in values {
        sum += (*v - max).exp();
    }
    max + sum.ln()
}

/// Stable log(exp(a) + exp(b)).
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    if a == f64::INFINITY || b == f64::INFINITY {
        return f64::INFINITY;
    }
    let m = a.max(b);
    let diff = (a - b).abs();
    m + (-diff).exp().ln_1p()
}

/// Softmax over raw scores, computed as exp(x - logsumexp(x)).
///
/// Returns None for empty input or when any score is non-finite.
pub fn softmax(scores: &[f64]) -> Option<Vec<f64>> {
    if scores.is_empty() || scores.iter().any(|s| !s.is_finite()) {
        return None;
    }
    let lse = log_sum_exp(scores);
    if !lse.is_finite() {
        return None;
    }
    Some(scores.iter().map(|s| (s - lse).exp()).collect())
}

/// Logistic sigmoid 1 / (1 + exp(-x)) without overflow for large |x|.
pub fn logistic(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// log(logistic(x)) = -log(1 + exp(-x)), stable in both tails.
pub fn log_logistic(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    -log_add_exp(0.0, -x)
}

/// Rescale non-negative weights so they sum to one.
///
/// Returns None if the input is empty, contains a negative or non-finite
/// weight, or sums to zero.
pub fn normalize(weights: &[f64]) -> Option<Vec<f64>> {
    if weights.is_empty() || weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(weights.iter().map(|w| w / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn log_sum_exp_basic() {
        let v = [0.0, 0.0];
        let out = log_sum_exp(&v);
        assert!(approx_eq(out, 2.0f64.ln(), 1e-12));
    }

    #[test]
    fn log_sum_exp_dominance() {
        let v = [-1000.0, 0.0];
        let out = log_sum_exp(&v);
        assert!(approx_eq(out, 0.0, 1e-12));
    }

    #[test]
    fn log_sum_exp_all_neg_inf() {
        let v = [f64::NEG_INFINITY, f64::NEG_INFINITY];
        let out = log_sum_exp(&v);
        assert!(out.is_infinite() && out.is_sign_negative());
    }

    #[test]
    fn log_sum_exp_nan_propagates() {
        let out = log_sum_exp(&[0.0, f64::NAN]);
        assert!(out.is_nan());
    }

    #[test]
    fn log_add_exp_matches_lse() {
        let a = 1.234;
        let b = -0.75;
        let out = log_add_exp(a, b);
        let lse = log_sum_exp(&[a, b]);
        assert!(approx_eq(out, lse, 1e-12));
    }

    #[test]
    fn softmax_uniform_scores() {
        let p = softmax(&[3.0, 3.0, 3.0, 3.0]).unwrap();
        for v in p {
            assert!(approx_eq(v, 0.25, 1e-12));
        }
    }

    #[test]
    fn softmax_large_scores_do_not_overflow() {
        let p = softmax(&[1000.0, 999.0]).unwrap();
        let expected = 1.0 / (1.0 + (-1.0f64).exp());
        assert!(approx_eq(p[0], expected, 1e-12));
        assert!(approx_eq(p[0] + p[1], 1.0, 1e-12));
    }

    #[test]
    fn softmax_rejects_empty_and_non_finite() {
        assert!(softmax(&[]).is_none());
        assert!(softmax(&[0.0, f64::NAN]).is_none());
        assert!(softmax(&[0.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn logistic_known_values() {
        assert!(approx_eq(logistic(0.0), 0.5, 1e-15));
        assert!(approx_eq(logistic(800.0), 1.0, 1e-15));
        assert!(approx_eq(logistic(-800.0), 0.0, 1e-15));
        assert!(logistic(-800.0) >= 0.0);
    }

    #[test]
    fn logistic_is_symmetric() {
        for x in [0.1, 1.0, 3.5, 12.0] {
            assert!(approx_eq(logistic(x) + logistic(-x), 1.0, 1e-12));
        }
    }

    #[test]
    fn log_logistic_matches_direct_form() {
        let x = 0.7;
        assert!(approx_eq(log_logistic(x), logistic(x).ln(), 1e-12));
        assert!(log_logistic(-800.0).is_finite());
    }

    #[test]
    fn normalize_rescales() {
        let out = normalize(&[1.0, 3.0]).unwrap();
        assert!(approx_eq(out[0], 0.25, 1e-12));
        assert!(approx_eq(out[1], 0.75, 1e-12));
    }

    #[test]
    fn normalize_rejects_degenerate_input() {
        assert!(normalize(&[]).is_none());
        assert!(normalize(&[0.0, 0.0]).is_none());
        assert!(normalize(&[1.0, -0.5]).is_none());
    }
}

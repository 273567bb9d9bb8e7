//! Decimal rounding for display-facing values.

/// Round to `decimals` places, half away from zero.
///
/// Non-finite values pass through unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // 2.345 * 100 == 234.49999999999997; keep it on the .5 boundary.
    // The nudge is a few ulps of `scaled`, so genuine sub-half values stay below.
    let nudged = scaled + scaled.signum() * scaled.abs() * 4.0 * f64::EPSILON;
    nudged.round() / factor
}

/// Round to two decimals (percent confidence).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to one decimal (baseline deltas).
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Round to three decimals (latency in milliseconds).
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(2.345, 2), 2.35);
        assert_eq!(round_to(-2.345, 2), -2.35);
        assert_eq!(round_to(0.05, 1), 0.1);
    }

    #[test]
    fn values_just_below_half_round_down() {
        assert_eq!(round2(45.194999999996), 45.19);
        assert_eq!(round2(-45.194999999996), -45.19);
        assert_eq!(round1(0.0499999999), 0.0);
        assert_eq!(round2(45.195), 45.2);
    }

    #[test]
    fn baseline_delta_example() {
        assert_eq!(round1(8.0 - 6.2), 1.8);
        assert_eq!(round1(5.0 - 7.1), -2.1);
    }

    #[test]
    fn percent_confidence() {
        assert_eq!(round2(0.912345 * 100.0), 91.23);
        assert_eq!(round2(1.0 * 100.0), 100.0);
    }

    #[test]
    fn latency_rounding() {
        assert_eq!(round3(0.0123456), 0.012);
    }

    #[test]
    fn non_finite_passthrough() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }
}

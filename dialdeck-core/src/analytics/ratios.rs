//! Percentage and period-over-period delta arithmetic.
//!
//! Every ratio in the product flows through [`rate`] and [`delta`] so the
//! divide-by-zero and outlier rules are applied in exactly one place. Neither
//! function ever returns `NaN` or an infinity.

/// Default cap (in percent) beyond which a delta is suppressed.
///
/// A previous count of 1 against a current count of 50 is a 4900%
/// "improvement" that should not be displayed as a real trend.
pub const DEFAULT_DELTA_SUPPRESSION_PCT: f64 = 999.0;

/// Percentage of `numerator` over `denominator`.
///
/// Returns 0 when the denominator is zero or negative.
pub fn rate(numerator: i64, denominator: i64) -> f64 {
    if denominator <= 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Period-over-period change in percent, or `None` when no comparison is
/// defined.
///
/// No comparison exists when `previous` is absent, zero, or negative, or when
/// the magnitude exceeds [`DEFAULT_DELTA_SUPPRESSION_PCT`].
pub fn delta(current: i64, previous: Option<i64>) -> Option<f64> {
    delta_with_cap(current, previous, DEFAULT_DELTA_SUPPRESSION_PCT)
}

/// [`delta`] with a caller-supplied suppression cap (see
/// `AnalyticsConfig::delta_suppression_pct`).
pub fn delta_with_cap(current: i64, previous: Option<i64>, cap: f64) -> Option<f64> {
    let previous = previous?;
    if previous <= 0 {
        return None;
    }
    let pct = (current - previous) as f64 / previous as f64 * 100.0;
    if pct.abs() > cap {
        return None;
    }
    Some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_zero_denominator_is_zero() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(42, 0), 0.0);
        assert_eq!(rate(42, -1), 0.0);
    }

    #[test]
    fn rate_is_a_plain_percentage() {
        assert_eq!(rate(20, 100), 20.0);
        assert_eq!(rate(100, 100), 100.0);
        assert_eq!(rate(1, 3), 1.0 / 3.0 * 100.0);
        // Over 100% is legal (e.g. achieved above target).
        assert_eq!(rate(150, 100), 150.0);
    }

    #[test]
    fn rate_never_produces_nan_or_infinity() {
        for num in [0, 1, 1000] {
            for den in [-5, 0, 1, 1000] {
                assert!(rate(num, den).is_finite());
            }
        }
    }

    #[test]
    fn delta_basic_cases() {
        assert_eq!(delta(110, Some(100)), Some(10.0));
        assert_eq!(delta(50, Some(100)), Some(-50.0));
        assert_eq!(delta(100, Some(100)), Some(0.0));
    }

    #[test]
    fn delta_undefined_for_missing_zero_or_negative_previous() {
        assert_eq!(delta(10, None), None);
        assert_eq!(delta(10, Some(0)), None);
        assert_eq!(delta(10, Some(-1)), None);
    }

    #[test]
    fn delta_suppresses_outliers() {
        // 1 -> 50 is +4900%, suppressed.
        assert_eq!(delta(50, Some(1)), None);
        // Exactly at the cap still shows.
        assert_eq!(delta_with_cap(20, Some(10), 100.0), Some(100.0));
        assert_eq!(delta_with_cap(21, Some(10), 100.0), None);
        // A large drop is suppressed by magnitude too.
        assert_eq!(delta_with_cap(0, Some(10), 50.0), None);
    }

    #[test]
    fn delta_respects_configured_cap() {
        assert_eq!(delta(1099, Some(100)), Some(999.0));
        assert_eq!(delta(1100, Some(100)), None);
        assert_eq!(delta_with_cap(1100, Some(100), 2000.0), Some(1000.0));
    }
}

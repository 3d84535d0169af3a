//! Full-column rolling and shift transforms.
//!
//! Every function maps an input column to an output column of the same
//! length. Positions that lack the history to be computed hold `f64::NAN`;
//! the table assembly drops those rows in one pass at the end. A NaN inside
//! a window makes that window's output NaN, so warm-up gaps propagate
//! through chained transforms instead of silently shrinking.

use crate::stats;

/// Rolling mean over `window` trailing values.
///
/// # Example
/// ```
/// let out = features::rolling::rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
/// assert!(out[0].is_nan());
/// assert_eq!(&out[1..], &[1.5, 2.5, 3.5]);
/// ```
///
/// # Panics
/// Panics if `window` is 0.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "rolling window must be > 0");
    let mut out = vec![f64::NAN; values.len()];
    for i in window - 1..values.len() {
        out[i] = stats::mean(&values[i + 1 - window..=i]).unwrap_or(f64::NAN);
    }
    out
}

/// Rolling sample standard deviation over `window` trailing values.
///
/// # Panics
/// Panics if `window` is 0.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "rolling window must be > 0");
    let mut out = vec![f64::NAN; values.len()];
    for i in window - 1..values.len() {
        out[i] = stats::sample_std_dev(&values[i + 1 - window..=i]).unwrap_or(f64::NAN);
    }
    out
}

/// Rolling Pearson correlation between two columns over `window` trailing
/// values. Windows where correlation is undefined (zero variance) are NaN.
///
/// # Panics
/// Panics if `window` is 0 or the columns differ in length.
pub fn rolling_corr(x: &[f64], y: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "rolling window must be > 0");
    assert_eq!(x.len(), y.len(), "rolling_corr inputs must match in length");
    let mut out = vec![f64::NAN; x.len()];
    for i in window - 1..x.len() {
        let span = i + 1 - window..=i;
        out[i] = stats::correlation(&x[span.clone()], &y[span]).unwrap_or(f64::NAN);
    }
    out
}

/// Period-over-period fractional change: `(v[i] - v[i-1]) / v[i-1]`.
///
/// Position 0 is NaN. Division follows IEEE semantics, so a zero previous
/// value yields an infinity rather than an error.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = (values[i] - values[i - 1]) / values[i - 1];
    }
    out
}

/// First difference: `v[i] - v[i-1]`, NaN at position 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}

/// Shift a column `offset` steps toward the past: row `i` takes the value
/// from row `i - offset`. The first `offset` rows are NaN.
pub fn shift_lag(values: &[f64], offset: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in offset..values.len() {
        out[i] = values[i - offset];
    }
    out
}

/// Shift a column `offset` steps toward the future: row `i` takes the value
/// from row `i + offset`. The final `offset` rows are NaN. This is how the
/// prediction target is built, and it is the only forward-looking transform.
pub fn shift_lead(values: &[f64], offset: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    for i in 0..n.saturating_sub(offset) {
        out[i] = values[i + offset];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nan_count(values: &[f64]) -> usize {
        values.iter().filter(|v| v.is_nan()).count()
    }

    #[test]
    fn test_rolling_mean_warm_up_and_values() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(nan_count(&out), 2);
        assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rolling_mean_window_longer_than_input() {
        let out = rolling_mean(&[1.0, 2.0], 5);
        assert_eq!(nan_count(&out), 2);
    }

    #[test]
    fn test_rolling_std_matches_sample_convention() {
        let out = rolling_std(&[2.0, 4.0, 6.0], 3);
        assert!((out[2] - 2.0).abs() < 1e-12);
        // Sample std over a single value is undefined.
        assert_eq!(nan_count(&rolling_std(&[1.0, 2.0, 3.0], 1)), 3);
    }

    #[test]
    fn test_rolling_corr_tracks_sign() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let out = rolling_corr(&x, &y, 3);
        assert_eq!(nan_count(&out), 2);
        assert!((out[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_inside_window_propagates() {
        let values = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let out = rolling_mean(&values, 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_eq!(out[3], 3.5);
    }

    #[test]
    fn test_pct_change_edges() {
        let out = pct_change(&[100.0, 110.0, 0.0, 5.0]);
        assert!(out[0].is_nan());
        assert!((out[1] - 0.1).abs() < 1e-12);
        assert_eq!(out[2], -1.0);
        assert!(out[3].is_infinite());
    }

    #[test]
    fn test_shift_lag_and_lead() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let lagged = shift_lag(&values, 2);
        assert_eq!(nan_count(&lagged[..2]), 2);
        assert_eq!(&lagged[2..], &[1.0, 2.0]);

        let led = shift_lead(&values, 1);
        assert_eq!(&led[..3], &[2.0, 3.0, 4.0]);
        assert!(led[3].is_nan());
    }

    #[test]
    fn test_shift_lead_offset_past_length() {
        assert_eq!(nan_count(&shift_lead(&[1.0, 2.0], 5)), 2);
    }
}

//! Scalar statistics over value slices.
//!
//! All functions return `None` when the input cannot support the statistic
//! (too short, mismatched lengths, zero variance for correlation). NaN
//! inputs are not screened out: they flow through the arithmetic so rolling
//! windows that cover undefined values stay undefined.

/// Mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n-1 denominator).
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean_val = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean_val).powi(2)).sum();
    Some(sum_sq / (n - 1) as f64)
}

/// Sample standard deviation (n-1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(|v| v.sqrt())
}

/// Pearson correlation between two equal-length slices.
///
/// `None` for fewer than two points, mismatched lengths, or when either
/// side has zero variance. A NaN anywhere yields `Some(NaN)`.
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}

//! Regression quality metrics.
//!
//! Both metrics return `None` for empty or mismatched inputs rather than
//! guessing a value.

/// Mean squared error.
pub fn mse(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return None;
    }
    let sum: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    Some(sum / actual.len() as f64)
}

/// Coefficient of determination.
///
/// A constant actual series has zero total variance; R² reports 0.0 there
/// instead of dividing by zero.
pub fn r2(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return None;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Some(0.0);
    }
    Some(1.0 - ss_res / ss_tot)
}

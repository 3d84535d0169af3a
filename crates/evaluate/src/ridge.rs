//! Deterministic ridge-regression baseline.
//!
//! The pipeline expects callers to bring a real estimator; this one exists
//! so evaluation runs end to end with no external dependency and with
//! bit-reproducible output. Features are standardized per column before the
//! normal equations are solved, which keeps the penalty scale-free and
//! makes |coefficient| a usable importance proxy.

use features::FeatureRow;

use crate::model::{ModelError, Regressor};

/// Pivots at or below this magnitude mark the system as singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// L2-regularized least squares on standardized features.
#[derive(Debug, Clone)]
pub struct RidgeRegressor {
    lambda: f64,
    fitted: Option<FittedState>,
}

#[derive(Debug, Clone)]
struct FittedState {
    means: Vec<f64>,
    stds: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl RidgeRegressor {
    /// `lambda` is the L2 penalty; zero disables regularization entirely
    /// and leaves collinear feature sets unsolvable.
    pub fn new(lambda: f64) -> Self {
        Self { lambda, fitted: None }
    }

    /// Factory handing each fold a fresh regressor with this `lambda`.
    pub fn factory(lambda: f64) -> impl Fn() -> Box<dyn Regressor> + Send + Sync {
        move || Box::new(RidgeRegressor::new(lambda)) as Box<dyn Regressor>
    }
}

impl Default for RidgeRegressor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Regressor for RidgeRegressor {
    fn fit(&mut self, x: &[FeatureRow], y: &[f64]) -> Result<(), ModelError> {
        if x.is_empty() {
            return Err(ModelError::Degenerate { detail: "empty training set".into() });
        }
        if x.len() != y.len() {
            return Err(ModelError::Degenerate {
                detail: format!("{} rows but {} targets", x.len(), y.len()),
            });
        }
        let n = x.len();
        let d = x[0].len();
        debug_assert!(x.iter().all(|row| row.len() == d));

        // Column standardization; constant columns get unit scale so their
        // standardized values are zero and the penalty drives them out.
        let mut means = vec![0.0; d];
        for row in x {
            for (j, value) in row.iter().enumerate() {
                means[j] += value;
            }
        }
        for mean in &mut means {
            *mean /= n as f64;
        }
        let mut stds = vec![0.0; d];
        for row in x {
            for (j, value) in row.iter().enumerate() {
                stds[j] += (value - means[j]).powi(2);
            }
        }
        for std in &mut stds {
            *std = (*std / n as f64).sqrt();
            if *std == 0.0 || !std.is_finite() {
                *std = 1.0;
            }
        }

        let intercept = y.iter().sum::<f64>() / n as f64;

        // Normal equations on the standardized design: (ZᵀZ + λI)β = Zᵀ(y - ȳ).
        let z =
            |i: usize, j: usize| (x[i][j] - means[j]) / stds[j];
        let mut gram = vec![vec![0.0; d]; d];
        let mut rhs = vec![0.0; d];
        for i in 0..n {
            let centered = y[i] - intercept;
            for j in 0..d {
                let zij = z(i, j);
                rhs[j] += zij * centered;
                for k in j..d {
                    gram[j][k] += zij * z(i, k);
                }
            }
        }
        for j in 0..d {
            for k in 0..j {
                gram[j][k] = gram[k][j];
            }
            gram[j][j] += self.lambda;
        }

        let coefficients = solve_linear_system(gram, rhs)
            .ok_or_else(|| ModelError::Degenerate { detail: "singular normal equations".into() })?;

        self.fitted = Some(FittedState { means, stds, coefficients, intercept });
        Ok(())
    }

    fn predict(&self, x: &[FeatureRow]) -> Result<Vec<f64>, ModelError> {
        let state = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        Ok(x.iter()
            .map(|row| {
                let mut value = state.intercept;
                for (j, coefficient) in state.coefficients.iter().enumerate() {
                    value += coefficient * (row[j] - state.means[j]) / state.stds[j];
                }
                value
            })
            .collect())
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        let state = self.fitted.as_ref()?;
        let mut weights: Vec<f64> = state.coefficients.iter().map(|c| c.abs()).collect();
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            for weight in &mut weights {
                *weight /= total;
            }
        }
        Some(weights)
    }

    fn name(&self) -> &str {
        "ridge"
    }
}

/// Gaussian elimination with partial pivoting. `None` when the best pivot
/// is effectively zero or not finite.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let d = b.len();
    for col in 0..d {
        let pivot_row = (col..d)
            .filter(|&r| a[r][col].is_finite())
            .max_by(|&r1, &r2| {
                a[r1][col].abs().partial_cmp(&a[r2][col].abs()).unwrap_or(std::cmp::Ordering::Equal)
            })?;
        if a[pivot_row][col].abs() <= PIVOT_EPSILON {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);
        for row in col + 1..d {
            let factor = a[row][col] / a[col][col];
            for k in col..d {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut solution = vec![0.0; d];
    for col in (0..d).rev() {
        let mut value = b[col];
        for k in col + 1..d {
            value -= a[col][k] * solution[k];
        }
        solution[col] = value / a[col][col];
        if !solution[col].is_finite() {
            return None;
        }
    }
    Some(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[f64]]) -> Vec<FeatureRow> {
        raw.iter().map(|r| r.iter().copied().collect()).collect()
    }

    #[test]
    fn test_recovers_a_linear_relationship() {
        let x = rows(&[
            &[1.0, 2.0],
            &[2.0, 1.0],
            &[3.0, 4.0],
            &[4.0, 3.0],
            &[5.0, 7.0],
            &[6.0, 5.0],
        ]);
        let y: Vec<f64> = x.iter().map(|r| 3.0 + 2.0 * r[0] - r[1]).collect();
        let mut model = RidgeRegressor::new(1e-8);
        model.fit(&x, &y).unwrap();
        let predicted = model.predict(&x).unwrap();
        for (p, a) in predicted.iter().zip(&y) {
            assert!((p - a).abs() < 1e-6, "predicted {p}, actual {a}");
        }
    }

    #[test]
    fn test_predict_before_fit() {
        let model = RidgeRegressor::default();
        assert_eq!(model.predict(&rows(&[&[1.0]])), Err(ModelError::NotFitted));
        assert_eq!(model.feature_importances(), None);
    }

    #[test]
    fn test_empty_training_set() {
        let mut model = RidgeRegressor::default();
        assert!(matches!(
            model.fit(&[], &[]),
            Err(ModelError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_importances_are_normalized_and_ranked() {
        // y follows the first column five times as strongly as the second.
        let x = rows(&[
            &[1.0, 1.0],
            &[2.0, -1.0],
            &[3.0, 2.0],
            &[4.0, -2.0],
            &[5.0, 1.5],
            &[6.0, -0.5],
        ]);
        let y: Vec<f64> = x.iter().map(|r| 5.0 * r[0] + r[1]).collect();
        let mut model = RidgeRegressor::new(1e-6);
        model.fit(&x, &y).unwrap();
        let importances = model.feature_importances().unwrap();
        assert_eq!(importances.len(), 2);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importances[0] > importances[1]);
    }

    #[test]
    fn test_duplicate_columns_without_penalty_are_singular() {
        let x = rows(&[&[1.0, 1.0], &[2.0, 2.0], &[3.0, 3.0], &[4.0, 4.0]]);
        let y = vec![1.0, 2.0, 3.0, 4.0];
        let mut unpenalized = RidgeRegressor::new(0.0);
        assert!(matches!(
            unpenalized.fit(&x, &y),
            Err(ModelError::Degenerate { .. })
        ));
        // Any positive penalty makes the same system solvable.
        let mut penalized = RidgeRegressor::new(0.1);
        penalized.fit(&x, &y).unwrap();
    }

    #[test]
    fn test_constant_target_predicts_its_mean() {
        let x = rows(&[&[1.0], &[2.0], &[3.0]]);
        let y = vec![0.5, 0.5, 0.5];
        let mut model = RidgeRegressor::default();
        model.fit(&x, &y).unwrap();
        let predicted = model.predict(&rows(&[&[10.0]])).unwrap();
        assert!((predicted[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_gets_zero_weight() {
        let x = rows(&[&[1.0, 7.0], &[2.0, 7.0], &[3.0, 7.0], &[4.0, 7.0]]);
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let mut model = RidgeRegressor::new(1e-6);
        model.fit(&x, &y).unwrap();
        let importances = model.feature_importances().unwrap();
        assert!(importances[1].abs() < 1e-9);
    }
}

//! The estimator seam.
//!
//! The evaluator treats models as replaceable collaborators behind
//! [`Regressor`]; anything with fit/predict/importances plugs in. Because
//! every fold trains a fresh instance, construction goes through a
//! [`RegressorFactory`] rather than cloning a prototype.

use std::fmt;

use features::FeatureRow;

/// Errors surfaced by an estimator.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// `predict` called before a successful `fit`.
    NotFitted,
    /// The training inputs cannot support a fit (empty set, mismatched
    /// lengths, singular system).
    Degenerate { detail: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFitted => write!(f, "model has not been fitted"),
            ModelError::Degenerate { detail } => write!(f, "degenerate fit: {detail}"),
        }
    }
}

impl std::error::Error for ModelError {}

/// A trainable regression estimator.
pub trait Regressor: Send {
    /// Fit on feature rows and a same-length target column.
    fn fit(&mut self, x: &[FeatureRow], y: &[f64]) -> Result<(), ModelError>;

    /// Predict one value per input row.
    fn predict(&self, x: &[FeatureRow]) -> Result<Vec<f64>, ModelError>;

    /// Per-feature importance weights in feature order, when the estimator
    /// exposes them. `None` before fitting or for models without a notion
    /// of importance.
    fn feature_importances(&self) -> Option<Vec<f64>>;

    fn name(&self) -> &str;
}

/// Builds one fresh estimator per fold.
pub trait RegressorFactory: Send + Sync {
    fn build(&self) -> Box<dyn Regressor>;
}

impl<F> RegressorFactory for F
where
    F: Fn() -> Box<dyn Regressor> + Send + Sync,
{
    fn build(&self) -> Box<dyn Regressor> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        assert_eq!(ModelError::NotFitted.to_string(), "model has not been fitted");
        let err = ModelError::Degenerate { detail: "empty training set".into() };
        assert_eq!(err.to_string(), "degenerate fit: empty training set");
    }

    #[test]
    fn test_closures_are_factories() {
        let factory = || Box::new(crate::ridge::RidgeRegressor::default()) as Box<dyn Regressor>;
        let model = RegressorFactory::build(&factory);
        assert_eq!(model.name(), "ridge");
    }
}

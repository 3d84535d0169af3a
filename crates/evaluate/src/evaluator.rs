//! The per-symbol evaluation protocol.

use features::FeatureTable;
use types::{SkipReason, Symbol};

use crate::metrics;
use crate::model::{Regressor, RegressorFactory};
use crate::split::walk_forward_folds;

/// Fold-averaged scores for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEvaluation {
    pub symbol: Symbol,
    /// Rows in the evaluated feature table.
    pub samples: usize,
    /// Folds the averages were taken over.
    pub folds: usize,
    pub avg_train_mse: f64,
    pub avg_test_mse: f64,
    pub avg_train_r2: f64,
    pub avg_test_r2: f64,
    /// Fold-averaged importance per feature, in feature order. Empty when
    /// the estimator exposes no importances.
    pub feature_importances: Vec<(String, f64)>,
}

/// A finished evaluation: the fold-averaged summary plus the model refitted
/// on the entire table.
pub struct EvaluatedSymbol {
    pub summary: SymbolEvaluation,
    pub model: Box<dyn Regressor>,
}

impl std::fmt::Debug for EvaluatedSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatedSymbol")
            .field("summary", &self.summary)
            .field("model", &self.model.name())
            .finish()
    }
}

/// Walk-forward evaluation of one feature table.
///
/// Requires at least `n_splits + 1` rows (raised further by `min_samples`
/// when set); each fold trains a fresh model from `factory` on its train
/// prefix and scores both partitions; metrics and importances average
/// arithmetically across folds; a final model is refitted on all rows.
/// Estimator errors surface as a [`SkipReason::ModelFailure`] skip, not a
/// panic.
pub fn evaluate_table(
    table: &FeatureTable,
    factory: &dyn RegressorFactory,
    n_splits: usize,
    min_samples: Option<usize>,
) -> Result<EvaluatedSymbol, SkipReason> {
    let samples = table.len();
    let required = (n_splits + 1).max(min_samples.unwrap_or(0));
    if samples < required {
        return Err(SkipReason::InsufficientSamples { rows: samples, required });
    }
    let folds = walk_forward_folds(samples, n_splits)
        .ok_or(SkipReason::InsufficientSamples { rows: samples, required })?;

    let (x, y) = table.to_matrix();
    let model_failure = |detail: String| SkipReason::ModelFailure { detail };

    let mut train_mse_sum = 0.0;
    let mut test_mse_sum = 0.0;
    let mut train_r2_sum = 0.0;
    let mut test_r2_sum = 0.0;
    let mut importance_sums = vec![0.0; table.feature_names().len()];
    let mut importance_folds = 0usize;

    for fold in &folds {
        let mut model = factory.build();
        model
            .fit(&x[fold.train.clone()], &y[fold.train.clone()])
            .map_err(|e| model_failure(e.to_string()))?;

        let train_pred = model
            .predict(&x[fold.train.clone()])
            .map_err(|e| model_failure(e.to_string()))?;
        let test_pred = model
            .predict(&x[fold.test.clone()])
            .map_err(|e| model_failure(e.to_string()))?;

        let train_actual = &y[fold.train.clone()];
        let test_actual = &y[fold.test.clone()];
        train_mse_sum += metrics::mse(train_actual, &train_pred)
            .ok_or_else(|| model_failure("undefined train metric".into()))?;
        train_r2_sum += metrics::r2(train_actual, &train_pred)
            .ok_or_else(|| model_failure("undefined train metric".into()))?;
        test_mse_sum += metrics::mse(test_actual, &test_pred)
            .ok_or_else(|| model_failure("undefined test metric".into()))?;
        test_r2_sum += metrics::r2(test_actual, &test_pred)
            .ok_or_else(|| model_failure("undefined test metric".into()))?;

        if let Some(importances) = model.feature_importances()
            && importances.len() == importance_sums.len()
        {
            for (sum, value) in importance_sums.iter_mut().zip(&importances) {
                *sum += value;
            }
            importance_folds += 1;
        }
    }

    let fold_count = folds.len();
    let feature_importances = if importance_folds == fold_count {
        table
            .feature_names()
            .iter()
            .cloned()
            .zip(importance_sums.iter().map(|sum| sum / fold_count as f64))
            .collect()
    } else {
        Vec::new()
    };

    // Refit over the full history; this is the model callers keep.
    let mut model = factory.build();
    model.fit(&x, &y).map_err(|e| model_failure(e.to_string()))?;

    Ok(EvaluatedSymbol {
        summary: SymbolEvaluation {
            symbol: table.symbol().to_string(),
            samples,
            folds: fold_count,
            avg_train_mse: train_mse_sum / fold_count as f64,
            avg_test_mse: test_mse_sum / fold_count as f64,
            avg_train_r2: train_r2_sum / fold_count as f64,
            avg_test_r2: test_r2_sum / fold_count as f64,
            feature_importances,
        },
        model,
    })
}

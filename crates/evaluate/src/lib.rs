//! Walk-forward model evaluation.
//!
//! Each symbol's feature table is scored with time-respecting
//! cross-validation: expanding train prefixes, a fresh model per fold, and
//! a final refit over the full history.
//!
//! ```text
//! fold 1: [train....][test]
//! fold 2: [train..........][test]
//! fold 3: [train................][test]
//! final:  [fit over everything.........]
//! ```
//!
//! A fold's test range always starts where its train range ends, so no
//! fold ever scores on data its model could have seen. Random splits are
//! deliberately unsupported.
//!
//! # Modules
//!
//! - [`split`]: fold geometry
//! - [`metrics`]: mean squared error and R²
//! - [`model`]: the [`Regressor`] seam external estimators plug into
//! - [`ridge`]: deterministic in-tree baseline estimator
//! - [`evaluator`]: the per-symbol evaluation protocol

pub mod evaluator;
pub mod metrics;
pub mod model;
pub mod ridge;
pub mod split;

pub use evaluator::{EvaluatedSymbol, SymbolEvaluation, evaluate_table};
pub use model::{ModelError, Regressor, RegressorFactory};
pub use ridge::RidgeRegressor;
pub use split::{Fold, walk_forward_folds};

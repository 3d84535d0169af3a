//! The run report: everything a finished run has to say.

use std::cmp::Ordering;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use evaluate::SymbolEvaluation;
use sentiment::{Cadence, SentimentJoinPolicy};
use types::{SkipReason, Symbol};

use crate::config::PipelineConfig;
use crate::error::Result;

/// Fold-averaged scores for one evaluated symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolReport {
    pub symbol: Symbol,
    pub samples: usize,
    pub folds: usize,
    pub avg_train_mse: f64,
    pub avg_test_mse: f64,
    pub avg_train_r2: f64,
    pub avg_test_r2: f64,
    /// Importances sorted by weight, heaviest first.
    pub feature_importances: Vec<(String, f64)>,
}

impl From<&SymbolEvaluation> for SymbolReport {
    fn from(evaluation: &SymbolEvaluation) -> Self {
        let mut importances = evaluation.feature_importances.clone();
        importances.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Self {
            symbol: evaluation.symbol.clone(),
            samples: evaluation.samples,
            folds: evaluation.folds,
            avg_train_mse: evaluation.avg_train_mse,
            avg_test_mse: evaluation.avg_test_mse,
            avg_train_r2: evaluation.avg_train_r2,
            avg_test_r2: evaluation.avg_test_r2,
            feature_importances: importances,
        }
    }
}

/// One skipped symbol and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipReport {
    pub symbol: Symbol,
    pub reason: SkipReason,
}

/// The configuration a run actually used, frozen into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    pub cadence: Cadence,
    pub join_policy: SentimentJoinPolicy,
    pub recency_days: Option<i64>,
    pub n_splits: usize,
    pub min_samples: Option<usize>,
    pub sentiment_ma_window: usize,
    pub correlation_window: usize,
    pub lag_depth: usize,
}

impl RunSettings {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            cadence: config.cadence,
            join_policy: config.join_policy,
            recency_days: config.recency_days,
            n_splits: config.n_splits,
            min_samples: config.min_samples,
            sentiment_ma_window: config.features.sentiment_ma_window,
            correlation_window: config.features.correlation_window,
            lag_depth: config.features.lag_depth,
        }
    }
}

/// Full record of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    /// Documents surviving merge, dedup and the recency filter.
    pub scored_documents: usize,
    /// Points in the aggregated sentiment series.
    pub series_points: usize,
    pub settings: RunSettings,
    pub evaluated: Vec<SymbolReport>,
    pub skipped: Vec<SkipReport>,
}

impl RunReport {
    /// The evaluated symbol with the highest out-of-sample R².
    pub fn best_symbol(&self) -> Option<&SymbolReport> {
        self.evaluated.iter().max_by(|a, b| {
            a.avg_test_r2.partial_cmp(&b.avg_test_r2).unwrap_or(Ordering::Equal)
        })
    }

    /// Export the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn symbol_report(symbol: &str, avg_test_r2: f64) -> SymbolReport {
        SymbolReport {
            symbol: symbol.to_string(),
            samples: 30,
            folds: 5,
            avg_train_mse: 0.01,
            avg_test_mse: 0.02,
            avg_train_r2: 0.9,
            avg_test_r2,
            feature_importances: vec![("Returns".to_string(), 0.6)],
        }
    }

    fn sample_report() -> RunReport {
        RunReport {
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            scored_documents: 240,
            series_points: 96,
            settings: RunSettings::from_config(&PipelineConfig::default()),
            evaluated: vec![symbol_report("AAPL", 0.4), symbol_report("MSFT", 0.7)],
            skipped: vec![SkipReport { symbol: "TINY".to_string(), reason: SkipReason::NoOverlap }],
        }
    }

    #[test]
    fn test_symbol_report_sorts_importances_descending() {
        let evaluation = SymbolEvaluation {
            symbol: "AAPL".to_string(),
            samples: 30,
            folds: 5,
            avg_train_mse: 0.01,
            avg_test_mse: 0.02,
            avg_train_r2: 0.9,
            avg_test_r2: 0.8,
            feature_importances: vec![
                ("Close".to_string(), 0.1),
                ("sentiment".to_string(), 0.6),
                ("Returns".to_string(), 0.3),
            ],
        };
        let report = SymbolReport::from(&evaluation);
        let names: Vec<&str> =
            report.feature_importances.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["sentiment", "Returns", "Close"]);
    }

    #[test]
    fn test_best_symbol_by_test_r2() {
        let report = sample_report();
        assert_eq!(report.best_symbol().unwrap().symbol, "MSFT");
    }

    #[test]
    fn test_report_round_trips_through_json_file() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let raw = std::fs::read(&path).unwrap();
        let back: RunReport = serde_json::from_slice(&raw).unwrap();
        assert_eq!(back.generated_at, report.generated_at);
        assert_eq!(back.evaluated.len(), 2);
        assert_eq!(back.skipped[0].symbol, "TINY");
        assert_eq!(back.settings.n_splits, 5);
        assert_eq!(back.settings.cadence, Cadence::Hourly);
    }
}

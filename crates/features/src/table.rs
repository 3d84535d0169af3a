//! Column-major containers for engineered features.

use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use types::Symbol;

/// One materialized predictor row. Inline capacity covers the default
/// column set without heap spill.
pub type FeatureRow = SmallVec<[f64; 32]>;

/// Canonical column names.
///
/// The joined sentiment column keeps its lowercase series name; derived
/// columns are CamelCase.
pub mod col {
    pub const OPEN: &str = "Open";
    pub const HIGH: &str = "High";
    pub const LOW: &str = "Low";
    pub const CLOSE: &str = "Close";
    pub const VOLUME: &str = "Volume";
    pub const RETURNS: &str = "Returns";
    pub const VOLATILITY: &str = "Volatility";
    pub const RSI: &str = "RSI";
    pub const SENTIMENT: &str = "sentiment";
    pub const SENTIMENT_DIFF: &str = "SentimentDiff";
    pub const SENTIMENT_RETURNS_CORR: &str = "SentimentReturnsCorr";
    pub const TARGET: &str = "Target";

    pub fn ma(window: usize) -> String {
        format!("MA{window}")
    }

    pub fn sentiment_ma(window: usize) -> String {
        format!("SentimentMA{window}")
    }

    pub fn returns_lag(offset: usize) -> String {
        format!("Returns_Lag_{offset}")
    }

    pub fn sentiment_lag(offset: usize) -> String {
        format!("Sentiment_Lag_{offset}")
    }
}

// =============================================================================
// Frame
// =============================================================================

/// A timestamp-indexed, column-major table of f64 columns.
///
/// Columns keep insertion order; that order is what a model later sees, so
/// it stays deterministic run to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: Vec<DateTime<Utc>>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Frame {
    pub fn new(index: Vec<DateTime<Utc>>) -> Self {
        Self { index, names: Vec::new(), columns: Vec::new() }
    }

    /// Append a column. Panics if its length differs from the index.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) {
        assert_eq!(values.len(), self.index.len(), "column length must match index");
        let name = name.into();
        debug_assert!(!self.names.contains(&name), "duplicate column {name}");
        self.names.push(name);
        self.columns.push(values);
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let pos = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[pos])
    }

    /// Materialize row `i` across all columns in column order.
    pub fn row(&self, i: usize) -> FeatureRow {
        self.columns.iter().map(|column| column[i]).collect()
    }

    /// Rows with `start <= timestamp <= end`, as a new frame.
    pub fn slice_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Frame {
        let lo = self.index.partition_point(|ts| *ts < start);
        let hi = self.index.partition_point(|ts| *ts <= end);
        Frame {
            index: self.index[lo..hi].to_vec(),
            names: self.names.clone(),
            columns: self.columns.iter().map(|column| column[lo..hi].to_vec()).collect(),
        }
    }

    /// Drop every row holding a NaN in any column. Infinities survive; only
    /// undefined values mark a row incomplete.
    pub fn drop_nan_rows(self) -> Frame {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.columns.iter().all(|column| !column[i].is_nan()))
            .collect();
        Frame {
            index: keep.iter().map(|&i| self.index[i]).collect(),
            names: self.names,
            columns: self
                .columns
                .into_iter()
                .map(|column| keep.iter().map(|&i| column[i]).collect())
                .collect(),
        }
    }

    /// Remove and return the named column.
    pub fn take_column(&mut self, name: &str) -> Option<Vec<f64>> {
        let pos = self.names.iter().position(|n| n == name)?;
        self.names.remove(pos);
        Some(self.columns.remove(pos))
    }
}

// =============================================================================
// FeatureTable
// =============================================================================

/// Predictors and target for one symbol, rows fully defined.
///
/// The target lives outside the predictor frame, so handing a model
/// `to_matrix()` output cannot leak it into the feature set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    symbol: Symbol,
    predictors: Frame,
    target: Vec<f64>,
}

impl FeatureTable {
    /// Split `target_name` out of `frame` and pair the remainder with it.
    /// Returns `None` when the column is missing.
    pub fn from_frame(symbol: impl Into<Symbol>, mut frame: Frame, target_name: &str) -> Option<Self> {
        let target = frame.take_column(target_name)?;
        Some(Self { symbol: symbol.into(), predictors: frame, target })
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.predictors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.predictors.is_empty()
    }

    #[inline]
    pub fn feature_names(&self) -> &[String] {
        self.predictors.names()
    }

    #[inline]
    pub fn index(&self) -> &[DateTime<Utc>] {
        self.predictors.index()
    }

    #[inline]
    pub fn target(&self) -> &[f64] {
        &self.target
    }

    pub fn row(&self, i: usize) -> FeatureRow {
        self.predictors.row(i)
    }

    /// Materialize `(X, y)` for model consumption.
    pub fn to_matrix(&self) -> (Vec<FeatureRow>, Vec<f64>) {
        let rows = (0..self.len()).map(|i| self.predictors.row(i)).collect();
        (rows, self.target.clone())
    }
}

//! Core shared types for the sentiment pipeline.
//!
//! Everything that crosses a crate boundary lives here: raw collector
//! records ([`RawDocument`], [`PriceBar`]), the timestamp-indexed
//! [`TimeSeries`] container, and the [`SkipReason`] taxonomy separating a
//! recoverable per-symbol skip from a fatal run-level error.

pub mod records;
pub mod series;

pub use records::{PriceBar, RawDocument};
pub use series::TimeSeries;

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Symbol Type
// =============================================================================

/// Stock ticker symbol (e.g., "AAPL", "GOOGL").
pub type Symbol = String;

// =============================================================================
// Document Sources
// =============================================================================

/// Origin of a raw text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Headlines and article snippets from news feeds.
    News,
    /// Short-form posts from social feeds.
    Social,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::News => write!(f, "news"),
            Source::Social => write!(f, "social"),
        }
    }
}

// =============================================================================
// Per-Symbol Skip Reasons
// =============================================================================

/// Why a symbol dropped out of a pipeline run.
///
/// A skip is recoverable: the run continues with the remaining symbols and
/// the reason travels into the run report. Only "every symbol skipped"
/// escalates to a fatal error, which lives in the pipeline crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Price history too short to yield a single fully-derived row.
    InsufficientHistory { rows: usize, required: usize },
    /// Sentiment and price series share no common time range.
    NoOverlap,
    /// Every candidate row lost a value to warm-up windows or the target shift.
    EmptyFeatureTable,
    /// Fewer complete rows than the fold protocol needs.
    InsufficientSamples { rows: usize, required: usize },
    /// The estimator rejected its inputs while fitting.
    ModelFailure { detail: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientHistory { rows, required } => {
                write!(f, "insufficient price history: {rows} bars, need more than {required}")
            }
            SkipReason::NoOverlap => {
                write!(f, "no overlap between sentiment and price ranges")
            }
            SkipReason::EmptyFeatureTable => {
                write!(f, "feature table empty after dropping incomplete rows")
            }
            SkipReason::InsufficientSamples { rows, required } => {
                write!(f, "insufficient samples for evaluation: {rows} rows, need {required}")
            }
            SkipReason::ModelFailure { detail } => {
                write!(f, "model failure: {detail}")
            }
        }
    }
}

impl std::error::Error for SkipReason {}

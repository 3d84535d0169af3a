//! RunRecorder - Built-in hook for aggregating run statistics.
//!
//! Collects per-run counts and the skip log. Useful for console summaries
//! and assertions in tests without wiring a custom hook.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use evaluate::SymbolEvaluation;
use types::{SkipReason, Symbol};

use crate::hooks::{PipelineHook, SentimentSummary};

/// Snapshot of recorder state at a point in time.
#[derive(Debug, Clone, Default)]
pub struct RecorderSnapshot {
    /// Documents surviving merge, dedup and the recency filter.
    pub scored_documents: u64,
    /// Points in the aggregated sentiment series.
    pub series_points: u64,
    /// Symbols that produced a trained model.
    pub evaluated_symbols: u64,
    /// Symbols that dropped out.
    pub skipped_symbols: u64,
    /// Skip reasons in arrival order.
    pub skip_log: Vec<(Symbol, SkipReason)>,
}

/// Built-in hook recording what happened during a run.
///
/// Thread-safe via atomics and a mutex-guarded log, so one recorder can
/// serve several pipelines.
///
/// # Example
///
/// ```ignore
/// use pipeline::{Pipeline, RunRecorder};
/// use std::sync::Arc;
///
/// let recorder = Arc::new(RunRecorder::new());
/// let mut pipeline = Pipeline::new(config);
/// pipeline.add_hook(recorder.clone());
///
/// // After the run...
/// let snapshot = recorder.snapshot();
/// eprintln!("skipped {} symbols", snapshot.skipped_symbols);
/// ```
#[derive(Default)]
pub struct RunRecorder {
    scored_documents: AtomicU64,
    series_points: AtomicU64,
    evaluated_symbols: AtomicU64,
    skipped_symbols: AtomicU64,
    skip_log: Mutex<Vec<(Symbol, SkipReason)>>,
}

impl RunRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current state.
    pub fn snapshot(&self) -> RecorderSnapshot {
        RecorderSnapshot {
            scored_documents: self.scored_documents.load(Ordering::Relaxed),
            series_points: self.series_points.load(Ordering::Relaxed),
            evaluated_symbols: self.evaluated_symbols.load(Ordering::Relaxed),
            skipped_symbols: self.skipped_symbols.load(Ordering::Relaxed),
            skip_log: self.skip_log.lock().clone(),
        }
    }

    /// Reset all counters and the skip log.
    pub fn reset(&self) {
        self.scored_documents.store(0, Ordering::Relaxed);
        self.series_points.store(0, Ordering::Relaxed);
        self.evaluated_symbols.store(0, Ordering::Relaxed);
        self.skipped_symbols.store(0, Ordering::Relaxed);
        self.skip_log.lock().clear();
    }
}

impl PipelineHook for RunRecorder {
    fn name(&self) -> &str {
        "Recorder"
    }

    fn on_sentiment_ready(&self, summary: &SentimentSummary) {
        self.scored_documents.store(summary.scored_documents as u64, Ordering::Relaxed);
        self.series_points.store(summary.series_points as u64, Ordering::Relaxed);
    }

    fn on_symbol_evaluated(&self, _evaluation: &SymbolEvaluation) {
        self.evaluated_symbols.fetch_add(1, Ordering::Relaxed);
    }

    fn on_symbol_skipped(&self, symbol: &str, reason: &SkipReason) {
        self.skipped_symbols.fetch_add(1, Ordering::Relaxed);
        self.skip_log.lock().push((symbol.to_string(), reason.clone()));
    }
}

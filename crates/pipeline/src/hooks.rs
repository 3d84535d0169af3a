//! Pipeline hooks for observing run lifecycle events.
//!
//! Hooks are **observers**: they receive run state at key lifecycle points
//! and cannot modify it. The pipeline owns the data; hooks watch and
//! report. There is no global logger anywhere in the workspace; anything
//! that wants to see progress registers a hook.
//!
//! # Thread Safety
//!
//! Hooks must be `Send + Sync`. The per-symbol stage may run on worker
//! threads, but hook invocation always happens on the collecting thread,
//! in input order; hook-owned state still wants atomics or a mutex because
//! one hook instance can serve several pipelines.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Pipeline.run()                                      │
//! │                                                      │
//! │  on_run_start          ← after input validation      │
//! │       ▼                                              │
//! │  on_sentiment_ready    ← merged series built         │
//! │       ▼                                              │
//! │  on_symbol_evaluated ┐ ← once per symbol, in input   │
//! │  on_symbol_skipped   ┘   order                       │
//! │       ▼                                              │
//! │  on_run_end            ← with the assembled report   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pipeline::hooks::PipelineHook;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! struct SkipCounter {
//!     count: AtomicU64,
//! }
//!
//! impl PipelineHook for SkipCounter {
//!     fn name(&self) -> &str { "SkipCounter" }
//!
//!     fn on_symbol_skipped(&self, _symbol: &str, _reason: &types::SkipReason) {
//!         self.count.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//! ```

use std::sync::Arc;

use evaluate::SymbolEvaluation;
use types::{SkipReason, Symbol};

use crate::report::RunReport;

// ─────────────────────────────────────────────────────────────────────────────
// Hook Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// What a run is about to process.
#[derive(Debug, Clone)]
pub struct RunStart {
    /// Symbols in input order.
    pub symbols: Vec<Symbol>,
    /// Document count from the news feed.
    pub news_documents: usize,
    /// Document count from the social feed.
    pub social_documents: usize,
}

/// Shape of the aggregated sentiment series, before any symbol work.
#[derive(Debug, Clone)]
pub struct SentimentSummary {
    /// Documents surviving merge, dedup and the recency filter.
    pub scored_documents: usize,
    /// Points in the aggregated series.
    pub series_points: usize,
    /// Mean polarity of the series, 0.0 when empty.
    pub mean_polarity: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// PipelineHook Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for pipeline observers.
///
/// Every method defaults to a no-op, so implementations pick the events
/// they care about. Hooks that keep payload data clone it; nothing handed
/// to a hook outlives the call.
pub trait PipelineHook: Send + Sync {
    /// Human-readable name for debugging.
    fn name(&self) -> &str;

    /// Called once after input validation, before any scoring.
    #[allow(unused_variables)]
    fn on_run_start(&self, start: &RunStart) {}

    /// Called once when the merged sentiment series is built.
    #[allow(unused_variables)]
    fn on_sentiment_ready(&self, summary: &SentimentSummary) {}

    /// Called for each symbol that produced a trained model.
    #[allow(unused_variables)]
    fn on_symbol_evaluated(&self, evaluation: &SymbolEvaluation) {}

    /// Called for each symbol that dropped out of the run.
    #[allow(unused_variables)]
    fn on_symbol_skipped(&self, symbol: &str, reason: &SkipReason) {}

    /// Called once with the assembled report. Not called on fatal errors.
    #[allow(unused_variables)]
    fn on_run_end(&self, report: &RunReport) {}
}

// ─────────────────────────────────────────────────────────────────────────────
// HookRunner
// ─────────────────────────────────────────────────────────────────────────────

/// Manages hook registration and sequential invocation.
///
/// Hooks are called in registration order. Each hook call is synchronous;
/// for async behavior, hooks should use interior channels/queues.
#[derive(Default)]
pub struct HookRunner {
    hooks: Vec<Arc<dyn PipelineHook>>,
}

impl HookRunner {
    /// Create a new empty hook runner.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a hook. Hooks are called in registration order.
    pub fn add(&mut self, hook: Arc<dyn PipelineHook>) {
        self.hooks.push(hook);
    }

    /// Get the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Get hook names for debugging.
    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Invoke `on_run_start` on all hooks.
    pub fn on_run_start(&self, start: &RunStart) {
        for hook in &self.hooks {
            hook.on_run_start(start);
        }
    }

    /// Invoke `on_sentiment_ready` on all hooks.
    pub fn on_sentiment_ready(&self, summary: &SentimentSummary) {
        for hook in &self.hooks {
            hook.on_sentiment_ready(summary);
        }
    }

    /// Invoke `on_symbol_evaluated` on all hooks.
    pub fn on_symbol_evaluated(&self, evaluation: &SymbolEvaluation) {
        for hook in &self.hooks {
            hook.on_symbol_evaluated(evaluation);
        }
    }

    /// Invoke `on_symbol_skipped` on all hooks.
    pub fn on_symbol_skipped(&self, symbol: &str, reason: &SkipReason) {
        for hook in &self.hooks {
            hook.on_symbol_skipped(symbol, reason);
        }
    }

    /// Invoke `on_run_end` on all hooks.
    pub fn on_run_end(&self, report: &RunReport) {
        for hook in &self.hooks {
            hook.on_run_end(report);
        }
    }
}

impl std::fmt::Debug for HookRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRunner")
            .field("hooks", &self.hook_names())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in Hooks
// ─────────────────────────────────────────────────────────────────────────────

/// A no-op hook useful for testing.
#[derive(Debug, Default)]
pub struct NoOpHook;

impl PipelineHook for NoOpHook {
    fn name(&self) -> &str {
        "NoOp"
    }
}

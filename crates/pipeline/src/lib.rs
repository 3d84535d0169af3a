//! Pipeline crate: batch orchestration for the sentiment analysis flow.
//!
//! This crate wires the leaf crates into one run:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    Pipeline.run()                      │
//! │                                                        │
//! │  1. Validate input, hook: on_run_start                 │
//! │  2. Score news + social feeds        (parallel)        │
//! │  3. Merge, dedup, recency filter, resample             │
//! │  4. Hook: on_sentiment_ready                           │
//! │  5. Per symbol: prepare -> join -> evaluate (parallel) │
//! │  6. Merge results, hooks: on_symbol_evaluated/skipped  │
//! │  7. Assemble RunReport, hook: on_run_end               │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-symbol problems are recoverable [`types::SkipReason`] values carried
//! into the report; [`PipelineError`] is reserved for conditions that sink
//! the whole run. Observation happens through [`PipelineHook`] observers,
//! never a global logger.
//!
//! # Example
//!
//! ```ignore
//! use pipeline::{Pipeline, PipelineConfig, PipelineInput, RunRecorder};
//! use evaluate::RidgeRegressor;
//! use std::sync::Arc;
//!
//! let recorder = Arc::new(RunRecorder::new());
//! let mut pipeline = Pipeline::new(PipelineConfig::default());
//! pipeline.add_hook(recorder.clone());
//!
//! let outcome = pipeline.run(input, &RidgeRegressor::factory(1.0))?;
//! println!("evaluated {} symbols", outcome.report.evaluated.len());
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod recorder;
pub mod report;
pub mod runner;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
// Vocabulary types that appear in `PipelineConfig` fields.
pub use sentiment::{Cadence, SentimentJoinPolicy};
pub use hooks::{HookRunner, NoOpHook, PipelineHook, RunStart, SentimentSummary};
pub use recorder::{RecorderSnapshot, RunRecorder};
pub use report::{RunReport, RunSettings, SkipReport, SymbolReport};
pub use runner::{Pipeline, PipelineInput, RunOutcome};

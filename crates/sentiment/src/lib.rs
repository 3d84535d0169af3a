//! Text sentiment scoring and aggregation.
//!
//! This crate turns raw feed documents into one chronologically ordered
//! sentiment series:
//!
//! ```text
//! RawDocument ──clean──▶ normalized text ──score──▶ ScoredDocument
//!                                                        │
//!                      merge + dedup + resample + fill ◀─┘
//!                                  │
//!                                  ▼
//!                        TimeSeries (one per run)
//! ```
//!
//! Cleaning and scoring sit behind traits so a run can swap in an external
//! scorer; [`BasicCleaner`] and [`LexiconScorer`] are the in-tree defaults.

pub mod aggregate;
pub mod clean;
pub mod score;

pub use aggregate::{
    Cadence, SentimentJoinPolicy, aggregate_scores, merge_scored, recency_filter, resample,
};
pub use clean::{BasicCleaner, TextCleaner};
pub use score::{LexiconScorer, ScoredDocument, SentimentScorer, score_document, score_documents};

//! Feature engineering for the sentiment pipeline.
//!
//! Turns prepared price bars and the aggregated sentiment series into one
//! supervised-learning table per symbol:
//!
//! ```text
//! PriceBar[] ──prepare──▶ Frame (OHLCV + Returns/Volatility/MA/RSI)
//!                            │ slice to overlap
//! TimeSeries ──reindex──▶    ▼
//!                         Frame + sentiment columns + lags + Target
//!                            │ drop incomplete rows
//!                            ▼
//!                        FeatureTable (predictors ∥ target)
//! ```
//!
//! # Design Notes
//!
//! - Derived columns carry `f64::NAN` through their warm-up span; rows are
//!   dropped in one pass at the end, never zero-filled.
//! - The target column is split from the predictors structurally, so no
//!   feature matrix can accidentally include it.
//! - Every derived value at row `i` reads inputs at or before `i`; the
//!   target is the single forward-looking column.
//!
//! # Modules
//!
//! - [`stats`]: scalar statistics over slices
//! - [`rolling`]: full-column rolling and shift transforms
//! - [`price`]: per-symbol price feature derivation
//! - [`table`]: column-major frame and feature table containers
//! - [`build`]: assembly of the final per-symbol table
//! - [`params`]: feature-stage tuning knobs

pub mod build;
pub mod params;
pub mod price;
pub mod rolling;
pub mod stats;
pub mod table;

pub use build::build_table;
pub use params::FeatureParams;
pub use price::prepare;
pub use table::{FeatureRow, FeatureTable, Frame, col};

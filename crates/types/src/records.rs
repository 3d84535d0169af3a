//! Raw input records as collectors hand them over.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::Source;

/// One text document from a news or social feed.
///
/// The timestamp keeps whatever zone offset the feed reported; the aligner
/// converts to UTC before anything downstream touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub source: Source,
    pub text: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl RawDocument {
    pub fn new(source: Source, text: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self { source, text: text.into(), timestamp }
    }
}

/// One OHLCV price bar for a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self { timestamp, open, high, low, close, volume }
    }
}

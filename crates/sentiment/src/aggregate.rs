//! Merging, filtering and resampling of scored documents.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use types::TimeSeries;

use crate::score::ScoredDocument;

// =============================================================================
// Cadence
// =============================================================================

/// Bucket width of the aggregated sentiment series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    Hourly,
    Daily,
}

impl Cadence {
    #[inline]
    pub fn seconds(self) -> i64 {
        match self {
            Cadence::Hourly => 3_600,
            Cadence::Daily => 86_400,
        }
    }

    /// Start of the bucket containing `ts`.
    pub fn floor(self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let step = self.seconds();
        let secs = ts.timestamp();
        let bucket = secs - secs.rem_euclid(step);
        // Flooring stays within chrono's range for any feed timestamp.
        DateTime::from_timestamp(bucket, 0).unwrap_or(ts)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Hourly => write!(f, "hourly"),
            Cadence::Daily => write!(f, "daily"),
        }
    }
}

// =============================================================================
// Join Policy
// =============================================================================

/// How the sentiment series meets the price index.
///
/// Both variants fill forward only, so neither can leak future sentiment
/// into a price row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentJoinPolicy {
    /// Average scores into fixed cadence buckets first, then reindex the
    /// bucketed series onto the price index.
    ResampleThenReindex,
    /// Skip bucketing and reindex raw scores straight onto the price index.
    ReindexRaw,
}

impl fmt::Display for SentimentJoinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentJoinPolicy::ResampleThenReindex => write!(f, "resample-then-reindex"),
            SentimentJoinPolicy::ReindexRaw => write!(f, "reindex-raw"),
        }
    }
}

// =============================================================================
// Merge / Filter / Resample
// =============================================================================

/// Merge the two source streams into one ordered, duplicate-free sequence.
///
/// News precedes social in the concatenation, so on a timestamp collision
/// the news document wins.
pub fn merge_scored(
    news: Vec<ScoredDocument>,
    social: Vec<ScoredDocument>,
) -> Vec<ScoredDocument> {
    let mut merged = news;
    merged.extend(social);
    align::sort_dedup_by_time(merged, |doc| doc.timestamp)
}

/// Keep only documents within the trailing `days` window, anchored at the
/// stream's own newest timestamp so batch runs stay reproducible.
pub fn recency_filter(scored: Vec<ScoredDocument>, days: i64) -> Vec<ScoredDocument> {
    let Some(newest) = scored.iter().map(|doc| doc.timestamp).max() else {
        return scored;
    };
    let cutoff = newest - TimeDelta::days(days);
    scored.into_iter().filter(|doc| doc.timestamp >= cutoff).collect()
}

/// Average scores into a dense cadence grid spanning the input range.
///
/// Buckets that received no documents carry the previous bucket's value
/// forward. The first bucket always contains the first document, so the
/// output has no leading gap to fill.
///
/// Input must be ordered; [`merge_scored`] output qualifies.
pub fn resample(scored: &[ScoredDocument], cadence: Cadence) -> TimeSeries {
    let (Some(first), Some(last)) = (scored.first(), scored.last()) else {
        return TimeSeries::new();
    };
    let step = TimeDelta::seconds(cadence.seconds());
    let last_bucket = cadence.floor(last.timestamp);

    let mut index = Vec::new();
    let mut values = Vec::new();
    let mut cursor = 0;
    let mut carry = 0.0;
    let mut bucket = cadence.floor(first.timestamp);
    while bucket <= last_bucket {
        let bucket_end = bucket + step;
        let mut sum = 0.0;
        let mut count = 0usize;
        while cursor < scored.len() && scored[cursor].timestamp < bucket_end {
            sum += scored[cursor].score;
            count += 1;
            cursor += 1;
        }
        if count > 0 {
            carry = sum / count as f64;
        }
        index.push(bucket);
        values.push(carry);
        bucket = bucket_end;
    }
    TimeSeries::from_parts(index, values)
}

/// The aggregated series a feature join will consume, per policy.
pub fn aggregate_scores(
    scored: &[ScoredDocument],
    cadence: Cadence,
    policy: SentimentJoinPolicy,
) -> TimeSeries {
    match policy {
        SentimentJoinPolicy::ResampleThenReindex => resample(scored, cadence),
        SentimentJoinPolicy::ReindexRaw => {
            TimeSeries::from_pairs(scored.iter().map(|doc| (doc.timestamp, doc.score)).collect())
        }
    }
}

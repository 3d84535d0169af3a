//! Temporal alignment primitives.
//!
//! Every join in the pipeline goes through the same three steps: timestamps
//! are canonicalized to UTC, each stream is sorted with duplicate
//! timestamps collapsed (first seen wins), and the maximal common sub-range
//! is resolved. An empty overlap is a diagnosable condition, never an
//! empty-but-successful result.
//!
//! Granularity is none of this crate's business: per-document timestamps
//! and price bars pass through unchanged, and resampling stays in the
//! sentiment aggregator.

use chrono::{DateTime, FixedOffset, Utc};
use types::TimeSeries;

// =============================================================================
// Canonicalization
// =============================================================================

/// Re-express a zone-aware timestamp in UTC. The instant is unchanged.
#[inline]
pub fn canonical_utc(ts: DateTime<FixedOffset>) -> DateTime<Utc> {
    ts.with_timezone(&Utc)
}

/// Stable-sort by timestamp, then collapse duplicate timestamps keeping the
/// first occurrence in input order.
pub fn sort_dedup_by_time<T, F>(mut items: Vec<T>, timestamp: F) -> Vec<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.sort_by_key(|item| timestamp(item));
    items.dedup_by(|a, b| timestamp(a) == timestamp(b));
    items
}

// =============================================================================
// Overlap Resolution
// =============================================================================

/// Maximal common sub-range of two series, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl OverlapRange {
    #[inline]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// `[max(starts), min(ends)]` of two closed ranges, or `None` when the
/// ranges are disjoint. A single shared instant still counts as overlap.
pub fn overlap_range(
    a: (DateTime<Utc>, DateTime<Utc>),
    b: (DateTime<Utc>, DateTime<Utc>),
) -> Option<OverlapRange> {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    (start <= end).then_some(OverlapRange { start, end })
}

// =============================================================================
// Reindexing
// =============================================================================

/// Project a series onto a target index: each target timestamp takes the
/// value at the latest series timestamp at or before it, and timestamps
/// before the first series point take `fill`.
///
/// Lookups only reach backward in time, so reindexed values never encode
/// information from after their own timestamp. The target index must be
/// ascending.
pub fn asof_reindex(series: &TimeSeries, index: &[DateTime<Utc>], fill: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(index.len());
    let mut next = 0;
    let mut current = None;
    for &ts in index {
        while next < series.len() && series.index()[next] <= ts {
            current = Some(series.values()[next]);
            next += 1;
        }
        out.push(current.unwrap_or(fill));
    }
    out
}

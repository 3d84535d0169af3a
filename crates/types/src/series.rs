//! Timestamp-indexed series of scalar values.

use chrono::{DateTime, Utc};

/// An ordered `(timestamp, value)` series with unique timestamps.
///
/// Construction enforces ascending order and first-seen-wins deduplication.
/// Transformations return new series; nothing mutates in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    index: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary pairs: stable-sorts by timestamp, then collapses
    /// duplicate timestamps keeping the first occurrence in input order.
    pub fn from_pairs(mut pairs: Vec<(DateTime<Utc>, f64)>) -> Self {
        pairs.sort_by_key(|(ts, _)| *ts);
        pairs.dedup_by(|a, b| a.0 == b.0);
        let (index, values) = pairs.into_iter().unzip();
        Self { index, values }
    }

    /// Build from an index/value pair already sorted with unique timestamps.
    pub fn from_parts(index: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        assert_eq!(index.len(), values.len(), "index/value length mismatch");
        debug_assert!(index.windows(2).all(|w| w[0] < w[1]));
        Self { index, values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, i: usize) -> Option<(DateTime<Utc>, f64)> {
        Some((*self.index.get(i)?, *self.values.get(i)?))
    }

    /// First and last timestamp, or `None` when empty.
    pub fn range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((*self.index.first()?, *self.index.last()?))
    }

    /// Rows with `start <= timestamp <= end`, as a new series.
    pub fn slice(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSeries {
        let lo = self.index.partition_point(|ts| *ts < start);
        let hi = self.index.partition_point(|ts| *ts <= end);
        TimeSeries {
            index: self.index[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_from_pairs_sorts_ascending() {
        let series = TimeSeries::from_pairs(vec![(ts(5), 0.5), (ts(1), 0.1), (ts(3), 0.3)]);
        assert_eq!(series.index(), &[ts(1), ts(3), ts(5)]);
        assert_eq!(series.values(), &[0.1, 0.3, 0.5]);
    }

    #[test]
    fn test_from_pairs_duplicate_keeps_first() {
        let series = TimeSeries::from_pairs(vec![(ts(2), 0.9), (ts(1), 0.1), (ts(2), -0.4)]);
        assert_eq!(series.len(), 2);
        // First occurrence in input order survives the stable sort.
        assert_eq!(series.get(1), Some((ts(2), 0.9)));
    }

    #[test]
    fn test_range_and_empty() {
        assert_eq!(TimeSeries::new().range(), None);
        let series = TimeSeries::from_pairs(vec![(ts(4), 0.0), (ts(2), 0.0)]);
        assert_eq!(series.range(), Some((ts(2), ts(4))));
    }

    #[test]
    fn test_slice_is_inclusive_on_both_ends() {
        let series =
            TimeSeries::from_pairs(vec![(ts(1), 1.0), (ts(2), 2.0), (ts(3), 3.0), (ts(4), 4.0)]);
        let sliced = series.slice(ts(2), ts(3));
        assert_eq!(sliced.index(), &[ts(2), ts(3)]);
        assert_eq!(sliced.values(), &[2.0, 3.0]);
    }

    #[test]
    fn test_slice_disjoint_range_is_empty() {
        let series = TimeSeries::from_pairs(vec![(ts(1), 1.0), (ts(2), 2.0)]);
        assert!(series.slice(ts(10), ts(12)).is_empty());
    }
}

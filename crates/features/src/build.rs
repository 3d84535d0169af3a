//! Assembly of the per-symbol feature table.

use types::{SkipReason, TimeSeries};

use crate::params::FeatureParams;
use crate::rolling::{rolling_corr, rolling_mean, shift_lag, shift_lead};
use crate::table::{FeatureTable, Frame, col};

/// Join the aggregated sentiment series onto one symbol's prepared price
/// frame and derive the sentiment, lag and target columns.
///
/// Steps: resolve the overlap range between the two series; slice both to
/// it; reindex sentiment onto the sliced price index (forward fill, neutral
/// 0.0 before the first sentiment point); derive `SentimentMA`,
/// `SentimentDiff`, `SentimentReturnsCorr`, both lag families and `Target`;
/// drop every incomplete row. An empty overlap or an empty result is a
/// skip, never a silently empty table.
pub fn build_table(
    symbol: &str,
    prices: &Frame,
    sentiment: &TimeSeries,
    params: &FeatureParams,
) -> Result<FeatureTable, SkipReason> {
    let price_range = match (prices.index().first(), prices.index().last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(SkipReason::NoOverlap),
    };
    let sentiment_range = sentiment.range().ok_or(SkipReason::NoOverlap)?;
    let overlap =
        align::overlap_range(price_range, sentiment_range).ok_or(SkipReason::NoOverlap)?;

    let mut combined = prices.slice_range(overlap.start, overlap.end);
    let sentiment_window = sentiment.slice(overlap.start, overlap.end);
    if combined.is_empty() || sentiment_window.is_empty() {
        return Err(SkipReason::NoOverlap);
    }

    let sentiment_col = align::asof_reindex(&sentiment_window, combined.index(), 0.0);
    let returns = combined
        .column(col::RETURNS)
        .expect("prepared price frame carries a Returns column")
        .to_vec();

    let sentiment_ma = rolling_mean(&sentiment_col, params.sentiment_ma_window);
    let sentiment_diff: Vec<f64> =
        sentiment_col.iter().zip(&sentiment_ma).map(|(s, ma)| s - ma).collect();
    let sentiment_corr = rolling_corr(&sentiment_col, &returns, params.correlation_window);

    combined.push_column(col::SENTIMENT, sentiment_col.clone());
    combined.push_column(col::sentiment_ma(params.sentiment_ma_window), sentiment_ma);
    combined.push_column(col::SENTIMENT_DIFF, sentiment_diff);
    combined.push_column(col::SENTIMENT_RETURNS_CORR, sentiment_corr);
    for offset in 1..=params.lag_depth {
        combined.push_column(col::returns_lag(offset), shift_lag(&returns, offset));
        combined.push_column(col::sentiment_lag(offset), shift_lag(&sentiment_col, offset));
    }
    combined.push_column(col::TARGET, shift_lead(&returns, 1));

    let complete = combined.drop_nan_rows();
    if complete.is_empty() {
        return Err(SkipReason::EmptyFeatureTable);
    }
    FeatureTable::from_frame(symbol, complete, col::TARGET).ok_or(SkipReason::EmptyFeatureTable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::prepare;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use types::PriceBar;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + TimeDelta::days(d as i64 - 1)
    }

    fn bars(n: usize) -> Vec<PriceBar> {
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar::new(day(i as u32 + 1), close, close + 1.0, close - 1.0, close, 1000.0)
            })
            .collect()
    }

    /// Sentiment points on every price day, alternating sign so rolling
    /// correlation windows never hit zero variance.
    fn dense_sentiment(n: usize) -> TimeSeries {
        TimeSeries::from_pairs(
            (0..n)
                .map(|i| (day(i as u32 + 1), if i % 2 == 0 { 0.4 } else { -0.2 }))
                .collect(),
        )
    }

    #[test]
    fn test_build_table_default_row_count() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        // Price stage leaves 20 rows; sentiment windows and lags take 5
        // leading rows, the target takes the final one.
        let table = build_table("AAPL", &prices, &dense_sentiment(40), &params).unwrap();
        assert_eq!(table.len(), 14);
        assert_eq!(table.symbol(), "AAPL");
        assert_eq!(table.index()[0], day(26));
    }

    #[test]
    fn test_build_table_column_order() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        let table = build_table("AAPL", &prices, &dense_sentiment(40), &params).unwrap();
        let expected = [
            "Open", "High", "Low", "Close", "Volume", "Returns", "Volatility", "MA5", "MA10",
            "MA20", "RSI", "sentiment", "SentimentMA5", "SentimentDiff", "SentimentReturnsCorr",
            "Returns_Lag_1", "Sentiment_Lag_1", "Returns_Lag_2", "Sentiment_Lag_2",
            "Returns_Lag_3", "Sentiment_Lag_3", "Returns_Lag_4", "Sentiment_Lag_4",
            "Returns_Lag_5", "Sentiment_Lag_5",
        ];
        assert_eq!(table.feature_names(), &expected);
        assert_eq!(table.feature_names().len(), params.predictor_count());
    }

    #[test]
    fn test_target_is_next_period_return() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        let table = build_table("AAPL", &prices, &dense_sentiment(40), &params).unwrap();
        let names = table.feature_names().to_vec();
        let returns_pos = names.iter().position(|n| n == col::RETURNS).unwrap();
        for i in 0..table.len() - 1 {
            let next_return = table.row(i + 1)[returns_pos];
            assert!((table.target()[i] - next_return).abs() < 1e-15);
        }
    }

    #[test]
    fn test_lag_columns_reach_into_the_sliced_series() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        let table = build_table("AAPL", &prices, &dense_sentiment(40), &params).unwrap();
        let names = table.feature_names().to_vec();
        let returns_pos = names.iter().position(|n| n == col::RETURNS).unwrap();
        let lag1_pos = names.iter().position(|n| n == "Returns_Lag_1").unwrap();
        for i in 1..table.len() {
            let prev_return = table.row(i - 1)[returns_pos];
            assert!((table.row(i)[lag1_pos] - prev_return).abs() < 1e-15);
        }
        // The first surviving row's lag reaches a pre-drop row, so its lag
        // value must be defined and differ from its own return.
        let first = table.row(0);
        assert!(!first[lag1_pos].is_nan());
    }

    #[test]
    fn test_sentiment_forward_fills_between_points() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        // Sentiment only on odd days: even price days carry the previous
        // day's value forward.
        let sparse = TimeSeries::from_pairs(
            (0..40)
                .filter(|i| i % 2 == 0)
                .map(|i| (day(i as u32 + 1), 0.1 * (i % 3) as f64 - 0.1))
                .collect(),
        );
        let table = build_table("AAPL", &prices, &sparse, &params).unwrap();
        let names = table.feature_names().to_vec();
        let sent_pos = names.iter().position(|n| n == col::SENTIMENT).unwrap();
        let index = table.index().to_vec();
        for (i, ts) in index.iter().enumerate() {
            let value = table.row(i)[sent_pos];
            let expected = sparse
                .iter()
                .filter(|(pts, _)| pts <= ts)
                .map(|(_, v)| v)
                .last()
                .unwrap();
            assert!((value - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn test_disjoint_ranges_are_a_skip() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        let elsewhere = TimeSeries::from_pairs(vec![
            (Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap(), 0.5),
            (Utc.with_ymd_and_hms(1999, 1, 2, 0, 0, 0).unwrap(), -0.5),
        ]);
        let err = build_table("AAPL", &prices, &elsewhere, &params).unwrap_err();
        assert_eq!(err, SkipReason::NoOverlap);
    }

    #[test]
    fn test_empty_sentiment_is_a_skip() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        let err = build_table("AAPL", &prices, &TimeSeries::new(), &params).unwrap_err();
        assert_eq!(err, SkipReason::NoOverlap);
    }

    #[test]
    fn test_too_short_overlap_empties_the_table() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        // Sentiment covers only the first four prepared price days: the
        // five-row warm-up plus the target shift consume everything.
        let short = TimeSeries::from_pairs(
            (20..24).map(|i| (day(i as u32 + 1), 0.2)).collect(),
        );
        let err = build_table("AAPL", &prices, &short, &params).unwrap_err();
        assert_eq!(err, SkipReason::EmptyFeatureTable);
    }

    #[test]
    fn test_long_price_history_clips_to_the_sentiment_range() {
        let date = |i: usize| {
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(i as i64)
        };
        let long_bars: Vec<PriceBar> = (0..250)
            .map(|i| {
                let close = 100.0 + (i % 7) as f64;
                PriceBar::new(date(i), close, close + 1.0, close - 1.0, close, 1000.0)
            })
            .collect();
        let params = FeatureParams::default();
        let prices = prepare(&long_bars, &params).unwrap();
        // Sentiment exists only for the middle 100 days.
        let sent_start = date(75);
        let sent_end = date(174);
        let middle = TimeSeries::from_pairs(
            (0..100).map(|i| (date(75 + i), if i % 2 == 0 { 0.3 } else { -0.1 })).collect(),
        );

        let table = build_table("AAPL", &prices, &middle, &params).unwrap();
        // 100 overlapping days minus the 5-row sentiment/lag warm-up and
        // the final target row.
        assert_eq!(table.len(), 94);
        assert!(table.index()[0] >= sent_start);
        assert!(*table.index().last().unwrap() <= sent_end);
        let (x, y) = table.to_matrix();
        assert!(x.iter().all(|row| row.iter().all(|v| v.is_finite())));
        assert!(y.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rebuilding_from_identical_inputs_is_bit_identical() {
        let params = FeatureParams::default();
        let prices = prepare(&bars(40), &params).unwrap();
        let sentiment = dense_sentiment(40);

        let first = build_table("AAPL", &prices, &sentiment, &params).unwrap();
        let second = build_table("AAPL", &prices, &sentiment, &params).unwrap();

        assert_eq!(first.index(), second.index());
        assert_eq!(first.feature_names(), second.feature_names());
        assert_eq!(first.to_matrix(), second.to_matrix());
    }
}

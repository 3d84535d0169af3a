//! Tuning knobs for the feature-engineering stage.

/// Window sizes and lag depth used when deriving feature columns.
///
/// Defaults mirror the standard daily-bar setup: 20-period volatility,
/// 10-period RSI, 5/10/20 moving averages, 5-period sentiment windows and
/// five lags of both returns and sentiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureParams {
    /// Rolling window for the standard deviation of returns.
    pub volatility_window: usize,
    /// Rolling window for RSI gain/loss averages.
    pub rsi_window: usize,
    /// Close-price moving average windows, one `MA{w}` column each.
    pub ma_windows: Vec<usize>,
    /// Rolling window for the sentiment moving average.
    pub sentiment_ma_window: usize,
    /// Rolling window for the sentiment/returns correlation.
    pub correlation_window: usize,
    /// Number of lagged copies of returns and sentiment (offsets 1..=depth).
    pub lag_depth: usize,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            volatility_window: 20,
            rsi_window: 10,
            ma_windows: vec![5, 10, 20],
            sentiment_ma_window: 5,
            correlation_window: 5,
            lag_depth: 5,
        }
    }
}

impl FeatureParams {
    pub fn with_volatility_window(mut self, window: usize) -> Self {
        self.volatility_window = window;
        self
    }

    pub fn with_rsi_window(mut self, window: usize) -> Self {
        self.rsi_window = window;
        self
    }

    pub fn with_ma_windows(mut self, windows: Vec<usize>) -> Self {
        self.ma_windows = windows;
        self
    }

    pub fn with_sentiment_ma_window(mut self, window: usize) -> Self {
        self.sentiment_ma_window = window;
        self
    }

    pub fn with_correlation_window(mut self, window: usize) -> Self {
        self.correlation_window = window;
        self
    }

    pub fn with_lag_depth(mut self, depth: usize) -> Self {
        self.lag_depth = depth;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Computed properties
    // ─────────────────────────────────────────────────────────────────────

    /// Leading rows the price stage cannot fully populate.
    ///
    /// Returns are undefined at row 0, which pushes the volatility warm-up
    /// one row past its window size. RSI clips that undefined first move to
    /// zero, so like the moving averages it only needs `window - 1` rows.
    pub fn price_warm_up_rows(&self) -> usize {
        let ma_max = self.ma_windows.iter().copied().max().unwrap_or(0);
        self.volatility_window
            .max(self.rsi_window.saturating_sub(1))
            .max(ma_max.saturating_sub(1))
    }

    /// Leading rows the combined table loses to sentiment windows and lags.
    pub fn table_warm_up_rows(&self) -> usize {
        self.sentiment_ma_window
            .saturating_sub(1)
            .max(self.correlation_window.saturating_sub(1))
            .max(self.lag_depth)
    }

    /// Number of predictor columns the default assembly produces.
    pub fn predictor_count(&self) -> usize {
        // OHLCV + Returns + Volatility + RSI, the MA set, then sentiment,
        // SentimentMA, SentimentDiff, SentimentReturnsCorr and both lag
        // families.
        8 + self.ma_windows.len() + 4 + 2 * self.lag_depth
    }

    /// Whether every window is usable (non-zero).
    pub fn is_valid(&self) -> bool {
        self.volatility_window > 0
            && self.rsi_window > 0
            && self.sentiment_ma_window > 0
            && self.correlation_window > 0
            && self.ma_windows.iter().all(|w| *w > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_consistency() {
        let params = FeatureParams::default();
        assert!(params.is_valid());
        assert_eq!(params.price_warm_up_rows(), 20);
        assert_eq!(params.table_warm_up_rows(), 5);
        assert_eq!(params.predictor_count(), 25);
    }

    #[test]
    fn test_builder_pattern() {
        let params = FeatureParams::default()
            .with_correlation_window(20)
            .with_lag_depth(3)
            .with_ma_windows(vec![5, 50]);
        assert_eq!(params.correlation_window, 20);
        assert_eq!(params.lag_depth, 3);
        assert_eq!(params.price_warm_up_rows(), 49);
        assert_eq!(params.table_warm_up_rows(), 19);
    }

    #[test]
    fn test_zero_window_is_invalid() {
        let params = FeatureParams::default().with_rsi_window(0);
        assert!(!params.is_valid());
    }
}

//! Per-symbol price feature derivation.

use types::{PriceBar, SkipReason};

use crate::params::FeatureParams;
use crate::rolling::{diff, pct_change, rolling_mean, rolling_std};
use crate::table::{Frame, col};

/// Derive the price-side feature columns for one symbol.
///
/// Input bars must already be sorted with unique timestamps. The output
/// frame holds OHLCV plus `Returns`, `Volatility`, one `MA{w}` per
/// configured window, and `RSI`, with every warm-up row dropped. Bars that
/// cannot yield a single complete row come back as a skip.
pub fn prepare(bars: &[PriceBar], params: &FeatureParams) -> Result<Frame, SkipReason> {
    let required = params.price_warm_up_rows();
    if bars.len() <= required {
        return Err(SkipReason::InsufficientHistory { rows: bars.len(), required });
    }

    let close: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let returns = pct_change(&close);

    let mut frame = Frame::new(bars.iter().map(|bar| bar.timestamp).collect());
    frame.push_column(col::OPEN, bars.iter().map(|bar| bar.open).collect());
    frame.push_column(col::HIGH, bars.iter().map(|bar| bar.high).collect());
    frame.push_column(col::LOW, bars.iter().map(|bar| bar.low).collect());
    frame.push_column(col::CLOSE, close.clone());
    frame.push_column(col::VOLUME, bars.iter().map(|bar| bar.volume).collect());
    frame.push_column(col::RETURNS, returns.clone());
    frame.push_column(col::VOLATILITY, rolling_std(&returns, params.volatility_window));
    for &window in &params.ma_windows {
        frame.push_column(col::ma(window), rolling_mean(&close, window));
    }
    frame.push_column(col::RSI, rsi(&close, params.rsi_window));

    let frame = frame.drop_nan_rows();
    if frame.is_empty() {
        return Err(SkipReason::InsufficientHistory { rows: bars.len(), required });
    }
    Ok(frame)
}

/// Relative Strength Index over simple rolling means of gains and losses.
///
/// `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`. With no losses in the
/// window the ratio is infinite and RSI saturates at 100; a flat window is
/// 0/0 and stays NaN, dropping the row.
fn rsi(close: &[f64], window: usize) -> Vec<f64> {
    let delta = diff(close);
    // The undefined first delta fails both comparisons and clips to zero,
    // like a flat move.
    let gains: Vec<f64> = delta.iter().map(|d| if *d > 0.0 { *d } else { 0.0 }).collect();
    let losses: Vec<f64> = delta.iter().map(|d| if *d < 0.0 { -*d } else { 0.0 }).collect();
    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);
    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| 100.0 - 100.0 / (1.0 + gain / loss))
        .collect()
}

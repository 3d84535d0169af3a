//! Synthetic feed generation for the demo binary.
//!
//! Prices and documents share a latent daily "mood" wave, so the generated
//! sentiment genuinely leads returns instead of being pure noise. All draws
//! come from a single seeded RNG; the same `RunConfig` always reproduces the
//! same feeds.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use pipeline::PipelineInput;
use types::{PriceBar, RawDocument, Source};

use crate::config::RunConfig;

/// First bar lands on this date; feeds extend forward day by day.
const FEED_START: (i32, u32, u32) = (2024, 1, 2);

/// Per-symbol daily drifts, cycled when there are more symbols than entries.
const DRIFTS: &[f64] = &[0.0012, -0.0008, 0.0005, -0.0003, 0.0009];

/// Starting closes, cycled alongside the drifts.
const INITIAL_CLOSES: &[f64] = &[185.0, 410.0, 152.0, 98.0, 260.0];

/// UTC offsets (seconds) rotated across news timestamps so the scoring path
/// sees non-UTC inputs.
const NEWS_OFFSETS: &[i32] = &[0, -5 * 3600, 2 * 3600, 9 * 3600 + 1800];

// =============================================================================
// Document Templates
// =============================================================================

// Template vocabulary is chosen to hit the default lexicon; "{sym}" is
// replaced with a ticker before the document is built.

const BULLISH_HEADLINES: &[&str] = &[
    "{sym} shares surge after record quarterly profit",
    "{sym} beats estimates as growth accelerates",
    "Analysts upgrade {sym} on strong momentum",
    "{sym} rallies to fresh highs after blowout quarter",
    "{sym} posts stellar results and raises dividend",
    "Robust demand lifts {sym} toward record revenue",
];

const BEARISH_HEADLINES: &[&str] = &[
    "{sym} shares plunge after earnings miss",
    "{sym} warns of weak demand and cuts guidance",
    "Analysts downgrade {sym} amid recession fears",
    "{sym} tumbles as layoffs signal slowdown",
    "{sym} slides on disappointing revenue shortfall",
    "Lawsuit probe drags {sym} to fresh lows",
];

const NEUTRAL_HEADLINES: &[&str] = &[
    "{sym} schedules annual shareholder meeting",
    "{sym} confirms date for quarterly report",
    "{sym} appoints new regional director",
    "Regulators publish routine {sym} filing summary",
];

const BULLISH_POSTS: &[&str] = &[
    "huge rally in {sym} today, momentum is real!",
    "{sym} looking strong, loading up before it soars",
    "{sym} earnings beat incoming, easy win",
    "{sym} chart is booming, higher highs all week #bullish",
    "best setup on {sym} in months, solid breakout",
];

const BEARISH_POSTS: &[&str] = &[
    "{sym} looks weak, selloff incoming",
    "bearish on {sym}, getting out before it crashes",
    "{sym} guidance miss means trouble ahead",
    "bagholding {sym}, worst trade of the year",
    "{sym} volume drying up, fear everywhere #selloff",
];

const NEUTRAL_POSTS: &[&str] = &[
    "anyone watching {sym} into the print?",
    "{sym} volume flat today, nothing happening",
    "just holding {sym} until next quarter",
];

// =============================================================================
// Generation
// =============================================================================

/// Latent market mood in [-1, 1] for a given day index.
///
/// A slow sine wave: today's mood says something about tomorrow's, which is
/// what makes the derived sentiment features predictive in the demo.
fn mood(day: usize) -> f64 {
    (day as f64 / 9.0).sin()
}

fn feed_start() -> DateTime<Utc> {
    let (year, month, day) = FEED_START;
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Build a complete `PipelineInput` from the config.
pub fn generate(config: &RunConfig) -> PipelineInput {
    if config.symbols.is_empty() {
        return PipelineInput::default();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let start = feed_start();

    let prices = config
        .symbols
        .iter()
        .enumerate()
        .map(|(i, symbol)| (symbol.clone(), price_walk(i, start, config, &mut rng)))
        .collect();

    let (news, social) = documents(start, config, &mut rng);

    PipelineInput { news, social, prices }
}

/// Random-walk OHLCV bars for one symbol, closing at 21:00 UTC each day.
fn price_walk(
    symbol_index: usize,
    start: DateTime<Utc>,
    config: &RunConfig,
    rng: &mut StdRng,
) -> Vec<PriceBar> {
    let drift = DRIFTS[symbol_index % DRIFTS.len()];
    let noise = Normal::new(0.0, 1.0).unwrap();

    let mut close = INITIAL_CLOSES[symbol_index % INITIAL_CLOSES.len()];
    let mut bars = Vec::with_capacity(config.days);

    for day in 0..config.days {
        let shock = config.daily_vol * noise.sample(rng);
        let ret = drift + config.mood_gain * mood(day) + shock;

        let open = close;
        close *= 1.0 + ret;
        let span = open.max(close) * (0.002 + 0.004 * rng.r#gen::<f64>());
        let high = open.max(close) + span;
        let low = (open.min(close) - span).max(0.01);
        let volume =
            config.base_volume * (1.0 + 25.0 * ret.abs()) * (0.7 + 0.6 * rng.r#gen::<f64>());

        let timestamp = start + Duration::days(day as i64) + Duration::hours(21);
        bars.push(PriceBar::new(timestamp, open, high, low, close, volume));
    }

    bars
}

/// Both document feeds for the whole window.
///
/// The bullish share of each day's documents follows that day's mood, and a
/// fixed slice stays neutral so the scorer also sees no-hit text. News lands
/// during market hours, social chatter later in the day.
fn documents(
    start: DateTime<Utc>,
    config: &RunConfig,
    rng: &mut StdRng,
) -> (Vec<RawDocument>, Vec<RawDocument>) {
    let mut news = Vec::new();
    let mut social = Vec::new();

    for day in 0..config.days {
        let bullish_share = 0.5 + config.mood_swing * mood(day);

        for slot in 0..config.docs_per_day {
            let symbol = &config.symbols[rng.gen_range(0..config.symbols.len())];
            let is_news = slot % 2 == 0;

            let pool = if rng.r#gen::<f64>() < config.neutral_share {
                if is_news { NEUTRAL_HEADLINES } else { NEUTRAL_POSTS }
            } else if rng.r#gen::<f64>() < bullish_share {
                if is_news { BULLISH_HEADLINES } else { BULLISH_POSTS }
            } else if is_news {
                BEARISH_HEADLINES
            } else {
                BEARISH_POSTS
            };
            let text = pool[rng.gen_range(0..pool.len())].replace("{sym}", symbol);

            let hour: i64 = if is_news { rng.gen_range(9..16) } else { rng.gen_range(16..23) };
            let minute: i64 = rng.gen_range(0..60);
            let utc = start + Duration::days(day as i64) + Duration::hours(hour)
                + Duration::minutes(minute);

            if is_news {
                let offset = FixedOffset::east_opt(NEWS_OFFSETS[slot % NEWS_OFFSETS.len()]).unwrap();
                news.push(RawDocument::new(Source::News, text, utc.with_timezone(&offset)));
            } else {
                let offset = FixedOffset::east_opt(0).unwrap();
                social.push(RawDocument::new(Source::Social, text, utc.with_timezone(&offset)));
            }
        }
    }

    (news, social)
}

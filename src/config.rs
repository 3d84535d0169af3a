//! Configuration for the synthetic demo feeds.
//!
//! Everything the generator needs to produce deterministic news, social,
//! and price inputs lives here for easy tuning.

/// Master configuration for demo feed generation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Feed Shape
    // ─────────────────────────────────────────────────────────────────────────
    /// Ticker symbols to generate price history for.
    pub symbols: Vec<String>,
    /// Days of history; one bar per symbol per day.
    pub days: usize,
    /// Documents generated per day across both feeds.
    pub docs_per_day: usize,
    /// RNG seed; the same seed always reproduces the same feeds.
    pub seed: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Price Walk
    // ─────────────────────────────────────────────────────────────────────────
    /// Daily return noise as a standard deviation (e.g. 0.012 = 1.2%).
    pub daily_vol: f64,
    /// How strongly the latent mood wave moves daily returns.
    pub mood_gain: f64,
    /// Baseline traded volume per bar.
    pub base_volume: f64,

    // ─────────────────────────────────────────────────────────────────────────
    // Document Mix
    // ─────────────────────────────────────────────────────────────────────────
    /// Fraction of documents with no polarity at all (0.0 - 1.0).
    pub neutral_share: f64,
    /// How strongly the mood wave skews the bullish/bearish document split.
    pub mood_swing: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            // Feed Shape
            symbols: vec!["AAPL".to_string(), "MSFT".to_string(), "GOOG".to_string()],
            days: 120,
            docs_per_day: 24,
            seed: 42,

            // Price Walk
            daily_vol: 0.012,
            mood_gain: 0.010,
            base_volume: 1_500_000.0,

            // Document Mix
            neutral_share: 0.15,
            mood_swing: 0.4,
        }
    }
}

impl RunConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder-style setters for fluent configuration
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the ticker symbols.
    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set days of price history.
    pub fn days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    /// Set documents per day.
    pub fn docs_per_day(mut self, docs: usize) -> Self {
        self.docs_per_day = docs;
        self
    }

    /// Set the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set daily return noise.
    pub fn daily_vol(mut self, vol: f64) -> Self {
        self.daily_vol = vol;
        self
    }

    /// Set mood influence on daily returns.
    pub fn mood_gain(mut self, gain: f64) -> Self {
        self.mood_gain = gain;
        self
    }

    /// Set the neutral document fraction.
    pub fn neutral_share(mut self, share: f64) -> Self {
        self.neutral_share = share;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Computed Properties
    // ─────────────────────────────────────────────────────────────────────────

    /// Total documents generated across both feeds.
    pub fn total_documents(&self) -> usize {
        self.days * self.docs_per_day
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preset Configurations
// ─────────────────────────────────────────────────────────────────────────────

impl RunConfig {
    /// Small fast feeds: enough history to evaluate, nothing more.
    pub fn smoke() -> Self {
        Self::default().days(40).docs_per_day(8)
    }

    /// Noisy prices with a weak sentiment link.
    pub fn choppy() -> Self {
        Self::default().daily_vol(0.03).mood_gain(0.004)
    }

    /// Strong sentiment link, few neutral documents.
    pub fn trending() -> Self {
        Self::default().mood_gain(0.02).neutral_share(0.05)
    }
}

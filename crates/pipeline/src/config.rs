//! Pipeline configuration options.

use features::FeatureParams;
use sentiment::{Cadence, SentimentJoinPolicy};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Rolling windows and lag depth for the feature stage.
    pub features: FeatureParams,

    /// Bucket width of the aggregated sentiment series.
    pub cadence: Cadence,

    /// How the sentiment series meets each symbol's price index.
    pub join_policy: SentimentJoinPolicy,

    /// Keep only documents within the trailing window, measured from the
    /// stream's newest timestamp. `None` keeps everything.
    pub recency_days: Option<i64>,

    /// Walk-forward folds per symbol.
    pub n_splits: usize,

    /// Raise the per-symbol sample floor above `n_splits + 1`.
    pub min_samples: Option<usize>,

    /// Run every stage sequentially even with the `parallel` feature on.
    pub force_sequential: bool,

    /// Enable progress lines on stderr.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            features: FeatureParams::default(),
            cadence: Cadence::Hourly,
            join_policy: SentimentJoinPolicy::ResampleThenReindex,
            recency_days: None,
            n_splits: 5,
            min_samples: None,
            force_sequential: false,
            verbose: false,
        }
    }
}

impl PipelineConfig {
    /// Daily sentiment buckets, matching a daily price feed one to one.
    pub fn daily() -> Self {
        Self {
            cadence: Cadence::Daily,
            ..Default::default()
        }
    }

    pub fn with_features(mut self, features: FeatureParams) -> Self {
        self.features = features;
        self
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn with_join_policy(mut self, policy: SentimentJoinPolicy) -> Self {
        self.join_policy = policy;
        self
    }

    pub fn with_recency_days(mut self, days: Option<i64>) -> Self {
        self.recency_days = days;
        self
    }

    pub fn with_n_splits(mut self, n_splits: usize) -> Self {
        self.n_splits = n_splits;
        self
    }

    pub fn with_min_samples(mut self, min_samples: Option<usize>) -> Self {
        self.min_samples = min_samples;
        self
    }

    pub fn with_force_sequential(mut self, force: bool) -> Self {
        self.force_sequential = force;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Computed properties
    // ─────────────────────────────────────────────────────────────────────

    /// Feature rows a symbol must retain to be trainable.
    pub fn required_samples(&self) -> usize {
        (self.n_splits + 1).max(self.min_samples.unwrap_or(0))
    }

    /// Price bars a symbol needs, assuming full sentiment coverage: warm-up
    /// drops in both stages, the trailing target row, then the sample floor.
    pub fn min_bars_per_symbol(&self) -> usize {
        self.features.price_warm_up_rows()
            + self.features.table_warm_up_rows()
            + 1
            + self.required_samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_consistency() {
        let config = PipelineConfig::default();
        assert!(config.features.is_valid());
        assert_eq!(config.cadence, Cadence::Hourly);
        assert_eq!(config.join_policy, SentimentJoinPolicy::ResampleThenReindex);
        assert_eq!(config.required_samples(), 6);
        assert_eq!(config.min_bars_per_symbol(), 32);
    }

    #[test]
    fn test_min_samples_only_raises_the_floor() {
        let low = PipelineConfig::default().with_min_samples(Some(3));
        assert_eq!(low.required_samples(), 6);
        let high = PipelineConfig::default().with_min_samples(Some(40));
        assert_eq!(high.required_samples(), 40);
        assert_eq!(high.min_bars_per_symbol(), 66);
    }

    #[test]
    fn test_daily_preset() {
        let config = PipelineConfig::daily().with_n_splits(3);
        assert_eq!(config.cadence, Cadence::Daily);
        assert_eq!(config.required_samples(), 4);
    }
}

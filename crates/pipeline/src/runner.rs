//! Pipeline runner implementing the batch run from raw feeds to models.
//!
//! One `run()` call walks the whole chain: score both document feeds,
//! merge them into a single sentiment series, then fan out per symbol to
//! prepare prices, build the feature table and evaluate a model. Per-symbol
//! problems become [`SkipReason`] entries in the report; only conditions
//! that sink the whole run (no input, every symbol skipped) return an
//! error.
//!
//! # Parallel Execution
//!
//! With the `parallel` feature enabled:
//! - Document scoring fans out via `parallel::map_slice`
//! - Per-symbol work fans out via `parallel::map_vec`, each job owning its
//!   bars
//!
//! Hook invocation and result merging always happen on the calling thread,
//! in input order, so reports and logs are deterministic regardless of the
//! thread count.

use std::sync::Arc;

use chrono::Utc;

use evaluate::{EvaluatedSymbol, Regressor, RegressorFactory};
use features::stats;
use sentiment::{
    BasicCleaner, LexiconScorer, SentimentScorer, TextCleaner, aggregate_scores, merge_scored,
    recency_filter, score_document,
};
use types::{PriceBar, RawDocument, SkipReason, Symbol, TimeSeries};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::hooks::{HookRunner, PipelineHook, RunStart, SentimentSummary};
use crate::report::{RunReport, RunSettings, SkipReport, SymbolReport};

/// Per-symbol outcome before merging: an evaluated model or a skip.
type SymbolOutcome = std::result::Result<EvaluatedSymbol, SkipReason>;

/// Everything one run consumes.
///
/// Collectors live outside this workspace; whatever fetches news, social
/// posts and price bars hands the batch over in this shape. Bars may
/// arrive unsorted and with duplicate timestamps; the runner canonicalizes
/// them per symbol.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub news: Vec<RawDocument>,
    pub social: Vec<RawDocument>,
    /// Per-symbol price history, processed in this order.
    pub prices: Vec<(Symbol, Vec<PriceBar>)>,
}

/// What a successful run hands back.
pub struct RunOutcome {
    pub report: RunReport,
    /// Refitted models for evaluated symbols, in input order.
    pub models: Vec<(Symbol, Box<dyn Regressor>)>,
}

/// The batch pipeline.
///
/// Cleaning and scoring are replaceable collaborators; the defaults are
/// the in-tree [`BasicCleaner`] and [`LexiconScorer`].
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: Box<dyn TextCleaner>,
    scorer: Box<dyn SentimentScorer>,
    hooks: HookRunner,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            cleaner: Box::new(BasicCleaner::new()),
            scorer: Box::new(LexiconScorer::new()),
            hooks: HookRunner::new(),
        }
    }

    /// Swap in another text cleaner.
    pub fn with_cleaner(mut self, cleaner: Box<dyn TextCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// Swap in another sentiment scorer.
    pub fn with_scorer(mut self, scorer: Box<dyn SentimentScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Register a hook. Hooks are called in registration order.
    pub fn add_hook(&mut self, hook: Arc<dyn PipelineHook>) {
        self.hooks.add(hook);
    }

    /// Get the number of registered hooks.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over one input batch.
    ///
    /// `factory` builds a fresh estimator per fold; keep it cheap. The
    /// returned models are the final full-history refits.
    pub fn run(&self, input: PipelineInput, factory: &dyn RegressorFactory) -> Result<RunOutcome> {
        if input.prices.is_empty() {
            return Err(PipelineError::NoSymbols);
        }
        if input.news.is_empty() && input.social.is_empty() {
            return Err(PipelineError::NoDocuments);
        }

        let force = self.config.force_sequential;
        self.hooks.on_run_start(&RunStart {
            symbols: input.prices.iter().map(|(symbol, _)| symbol.clone()).collect(),
            news_documents: input.news.len(),
            social_documents: input.social.len(),
        });

        // Stage 1: score both feeds and merge into one sentiment series.
        let news_scored = parallel::map_slice(
            &input.news,
            |doc| score_document(doc, self.cleaner.as_ref(), self.scorer.as_ref()),
            force,
        );
        let social_scored = parallel::map_slice(
            &input.social,
            |doc| score_document(doc, self.cleaner.as_ref(), self.scorer.as_ref()),
            force,
        );
        let mut merged = merge_scored(news_scored, social_scored);
        if let Some(days) = self.config.recency_days {
            merged = recency_filter(merged, days);
        }
        let series = aggregate_scores(&merged, self.config.cadence, self.config.join_policy);

        let summary = SentimentSummary {
            scored_documents: merged.len(),
            series_points: series.len(),
            mean_polarity: stats::mean(series.values()).unwrap_or(0.0),
        };
        if self.config.verbose {
            eprintln!(
                "[run] {} documents -> {} {} sentiment points (mean polarity {:+.3})",
                summary.scored_documents,
                summary.series_points,
                self.config.cadence,
                summary.mean_polarity
            );
        }
        self.hooks.on_sentiment_ready(&summary);

        // Stage 2: fan out per symbol; each job owns its bars.
        let attempted = input.prices.len();
        let results: Vec<(Symbol, SymbolOutcome)> = parallel::map_vec(
            input.prices,
            |(symbol, bars)| {
                let outcome = self.evaluate_symbol(&symbol, bars, &series, factory);
                (symbol, outcome)
            },
            force,
        );

        // Stage 3: merge on this thread, firing hooks in input order.
        let mut evaluated = Vec::new();
        let mut skipped = Vec::new();
        let mut models = Vec::new();
        for (symbol, outcome) in results {
            match outcome {
                Ok(result) => {
                    if self.config.verbose {
                        eprintln!(
                            "[run] {}: {} samples over {} folds, test R2 {:+.4}",
                            symbol,
                            result.summary.samples,
                            result.summary.folds,
                            result.summary.avg_test_r2
                        );
                    }
                    self.hooks.on_symbol_evaluated(&result.summary);
                    evaluated.push(SymbolReport::from(&result.summary));
                    models.push((symbol, result.model));
                }
                Err(reason) => {
                    if self.config.verbose {
                        eprintln!("[run] {} skipped: {}", symbol, reason);
                    }
                    self.hooks.on_symbol_skipped(&symbol, &reason);
                    skipped.push(SkipReport { symbol, reason });
                }
            }
        }
        if evaluated.is_empty() {
            return Err(PipelineError::AllSymbolsFailed { attempted });
        }

        let report = RunReport {
            generated_at: Utc::now(),
            scored_documents: summary.scored_documents,
            series_points: summary.series_points,
            settings: RunSettings::from_config(&self.config),
            evaluated,
            skipped,
        };
        self.hooks.on_run_end(&report);
        Ok(RunOutcome { report, models })
    }

    /// The per-symbol chain: canonicalize bars, derive price features,
    /// join sentiment, evaluate. Any stage may skip the symbol.
    fn evaluate_symbol(
        &self,
        symbol: &str,
        bars: Vec<PriceBar>,
        sentiment: &TimeSeries,
        factory: &dyn RegressorFactory,
    ) -> SymbolOutcome {
        let bars = align::sort_dedup_by_time(bars, |bar| bar.timestamp);
        let prepared = features::prepare(&bars, &self.config.features)?;
        let table = features::build_table(symbol, &prepared, sentiment, &self.config.features)?;
        evaluate::evaluate_table(&table, factory, self.config.n_splits, self.config.min_samples)
    }
}

impl std::fmt::Debug for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let models: Vec<(&Symbol, &str)> = self
            .models
            .iter()
            .map(|(symbol, model)| (symbol, model.name()))
            .collect();
        f.debug_struct("RunOutcome")
            .field("report", &self.report)
            .field("models", &models)
            .finish()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("scorer", &self.scorer.name())
            .field("hooks", &self.hooks)
            .finish()
    }
}

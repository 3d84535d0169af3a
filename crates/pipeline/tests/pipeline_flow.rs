//! End-to-end pipeline runs over deterministic hand-built feeds.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};

use evaluate::{RidgeRegressor, SymbolEvaluation};
use pipeline::{
    Pipeline, PipelineConfig, PipelineError, PipelineHook, PipelineInput, RunRecorder, RunReport,
    RunStart, SentimentSummary,
};
use types::{PriceBar, RawDocument, SkipReason, Source};

fn day(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + TimeDelta::days(i as i64)
}

fn bars(n: usize, close: impl Fn(usize) -> f64) -> Vec<PriceBar> {
    (0..n)
        .map(|i| {
            let c = close(i);
            PriceBar::new(day(i), c, c + 1.0, c - 1.0, c, 1000.0)
        })
        .collect()
}

/// Two documents per day with alternating polarity, on mixed offsets so
/// canonicalization is exercised.
fn documents(days: usize) -> (Vec<RawDocument>, Vec<RawDocument>) {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let mut news = Vec::new();
    let mut social = Vec::new();
    for i in 0..days {
        let base = day(i).with_timezone(&plus_two);
        let (headline, post) = if i % 2 == 0 {
            ("Shares surge on strong profit growth", "great rally momentum today")
        } else {
            ("Stock plunges amid weak loss fears", "bearish selloff everyone worried")
        };
        news.push(RawDocument::new(Source::News, headline, base + TimeDelta::hours(10)));
        social.push(RawDocument::new(Source::Social, post, base + TimeDelta::hours(20)));
    }
    (news, social)
}

fn full_input() -> PipelineInput {
    let (news, social) = documents(60);
    PipelineInput {
        news,
        social,
        prices: vec![
            ("UP".to_string(), bars(60, |i| 100.0 + i as f64 + (i % 3) as f64 * 0.5)),
            ("DOWN".to_string(), bars(60, |i| 200.0 - 0.5 * i as f64 - (i % 2) as f64)),
            ("TINY".to_string(), bars(10, |i| 50.0 + i as f64)),
        ],
    }
}

#[test]
fn test_full_run_produces_report_and_models() {
    let recorder = Arc::new(RunRecorder::new());
    let mut pipeline = Pipeline::new(PipelineConfig::daily().with_force_sequential(true));
    pipeline.add_hook(recorder.clone());

    let outcome = pipeline.run(full_input(), &RidgeRegressor::factory(1.0)).unwrap();
    let report = &outcome.report;

    // 120 distinct timestamps collapse into 60 daily buckets.
    assert_eq!(report.scored_documents, 120);
    assert_eq!(report.series_points, 60);

    // Both long symbols evaluate, in input order; the short one is skipped.
    assert_eq!(report.evaluated.len(), 2);
    assert_eq!(report.evaluated[0].symbol, "UP");
    assert_eq!(report.evaluated[1].symbol, "DOWN");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].symbol, "TINY");
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::InsufficientHistory { rows: 10, required: 20 }
    );

    // 60 bars lose 20 to price warm-up, 5 to table warm-up, 1 to the target.
    for symbol in &report.evaluated {
        assert_eq!(symbol.samples, 34);
        assert_eq!(symbol.folds, 5);
        assert!(symbol.avg_train_mse.is_finite());
        assert!(symbol.avg_test_r2.is_finite());
        assert_eq!(symbol.feature_importances.len(), 25);
        assert!(
            symbol
                .feature_importances
                .windows(2)
                .all(|pair| pair[0].1 >= pair[1].1),
            "importances must be sorted heaviest first"
        );
    }

    // Models come back refitted, in input order.
    assert_eq!(outcome.models.len(), 2);
    assert_eq!(outcome.models[0].0, "UP");
    assert_eq!(outcome.models[0].1.name(), "ridge");

    assert!(report.best_symbol().is_some());

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.scored_documents, 120);
    assert_eq!(snapshot.series_points, 60);
    assert_eq!(snapshot.evaluated_symbols, 2);
    assert_eq!(snapshot.skipped_symbols, 1);
    assert_eq!(snapshot.skip_log[0].0, "TINY");
}

struct StageCounter {
    run_starts: AtomicU64,
    sentiment_ready: AtomicU64,
    evaluated: AtomicU64,
    skipped: AtomicU64,
    run_ends: AtomicU64,
}

impl StageCounter {
    fn new() -> Self {
        Self {
            run_starts: AtomicU64::new(0),
            sentiment_ready: AtomicU64::new(0),
            evaluated: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            run_ends: AtomicU64::new(0),
        }
    }
}

impl PipelineHook for StageCounter {
    fn name(&self) -> &str {
        "StageCounter"
    }

    fn on_run_start(&self, start: &RunStart) {
        assert_eq!(start.symbols.len(), 3);
        assert_eq!(start.news_documents, 60);
        self.run_starts.fetch_add(1, Ordering::Relaxed);
    }

    fn on_sentiment_ready(&self, summary: &SentimentSummary) {
        assert!(summary.series_points > 0);
        self.sentiment_ready.fetch_add(1, Ordering::Relaxed);
    }

    fn on_symbol_evaluated(&self, _evaluation: &SymbolEvaluation) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
    }

    fn on_symbol_skipped(&self, _symbol: &str, _reason: &SkipReason) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn on_run_end(&self, report: &RunReport) {
        assert_eq!(report.evaluated.len(), 2);
        self.run_ends.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn test_hooks_fire_once_per_stage() {
    let counter = Arc::new(StageCounter::new());
    let mut pipeline = Pipeline::new(PipelineConfig::daily().with_force_sequential(true));
    pipeline.add_hook(counter.clone());

    pipeline.run(full_input(), &RidgeRegressor::factory(1.0)).unwrap();

    assert_eq!(counter.run_starts.load(Ordering::Relaxed), 1);
    assert_eq!(counter.sentiment_ready.load(Ordering::Relaxed), 1);
    assert_eq!(counter.evaluated.load(Ordering::Relaxed), 2);
    assert_eq!(counter.skipped.load(Ordering::Relaxed), 1);
    assert_eq!(counter.run_ends.load(Ordering::Relaxed), 1);
}

#[test]
fn test_results_do_not_depend_on_execution_mode() {
    let sequential = Pipeline::new(PipelineConfig::daily().with_force_sequential(true));
    let default_mode = Pipeline::new(PipelineConfig::daily());

    let a = sequential.run(full_input(), &RidgeRegressor::factory(1.0)).unwrap();
    let b = default_mode.run(full_input(), &RidgeRegressor::factory(1.0)).unwrap();

    assert_eq!(a.report.evaluated.len(), b.report.evaluated.len());
    for (left, right) in a.report.evaluated.iter().zip(&b.report.evaluated) {
        assert_eq!(left.symbol, right.symbol);
        assert_eq!(left.avg_train_mse, right.avg_train_mse);
        assert_eq!(left.avg_test_mse, right.avg_test_mse);
        assert_eq!(left.feature_importances, right.feature_importances);
    }
}

#[test]
fn test_tight_recency_window_starves_every_join() {
    // Three days of sentiment against a 26-row warm-up leaves no complete
    // rows anywhere, which must fail the run rather than succeed empty.
    let pipeline = Pipeline::new(
        PipelineConfig::daily()
            .with_force_sequential(true)
            .with_recency_days(Some(3)),
    );
    let (news, social) = documents(60);
    let input = PipelineInput {
        news,
        social,
        prices: vec![
            ("UP".to_string(), bars(60, |i| 100.0 + i as f64 + (i % 3) as f64 * 0.5)),
            ("DOWN".to_string(), bars(60, |i| 200.0 - 0.5 * i as f64 - (i % 2) as f64)),
        ],
    };
    let err = pipeline.run(input, &RidgeRegressor::factory(1.0)).unwrap_err();
    assert!(matches!(err, PipelineError::AllSymbolsFailed { attempted: 2 }));
}

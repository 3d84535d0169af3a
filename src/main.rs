//! Sentiment pipeline demo binary.
//!
//! Generates seeded synthetic news/social/price feeds, pushes them through
//! the full pipeline, and prints a walk-forward evaluation summary:
//!
//! ```text
//! datagen (seeded RNG)
//!     |  documents + price bars
//!     v
//! Pipeline::run  ->  RunReport  ->  console summary (+ optional JSON file)
//! ```
//!
//! Every flag is also settable through a `PIPELINE_*` environment variable,
//! so CI runs and containers need no command line.

mod config;
mod datagen;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use evaluate::RidgeRegressor;
use pipeline::{
    Pipeline, PipelineConfig, RecorderSnapshot, RunOutcome, RunRecorder, SentimentJoinPolicy,
};

pub use config::RunConfig;

/// Ridge strength when `--lambda` is not given.
const DEFAULT_LAMBDA: f64 = 1.0;

/// Sentiment pipeline - synthetic feed demo runner
#[derive(Parser, Debug)]
#[command(name = "sentiment-pipeline")]
#[command(about = "Score synthetic news/social feeds and evaluate sentiment features against prices")]
#[command(version)]
struct Args {
    /// Comma-separated ticker symbols for the synthetic feeds
    #[arg(long, env = "PIPELINE_SYMBOLS")]
    symbols: Option<String>,

    /// Days of price history to generate
    #[arg(long, env = "PIPELINE_DAYS")]
    days: Option<usize>,

    /// Documents generated per day across both feeds
    #[arg(long, env = "PIPELINE_DOCS_PER_DAY")]
    docs_per_day: Option<usize>,

    /// RNG seed for the synthetic feeds
    #[arg(long, env = "PIPELINE_SEED")]
    seed: Option<u64>,

    /// Aggregate sentiment into daily buckets instead of hourly
    #[arg(long, env = "PIPELINE_DAILY")]
    daily: bool,

    /// Skip bucketing and reindex raw scored points onto the price index
    #[arg(long, env = "PIPELINE_RAW_JOIN")]
    raw_join: bool,

    /// Drop documents older than this many days relative to the freshest one
    #[arg(long, env = "PIPELINE_RECENCY_DAYS")]
    recency_days: Option<i64>,

    /// Walk-forward fold count
    #[arg(long, env = "PIPELINE_SPLITS")]
    splits: Option<usize>,

    /// Minimum feature rows a symbol needs before evaluation
    #[arg(long, env = "PIPELINE_MIN_SAMPLES")]
    min_samples: Option<usize>,

    /// Ridge regularization strength
    #[arg(long, env = "PIPELINE_LAMBDA")]
    lambda: Option<f64>,

    /// Disable parallel scoring and per-symbol evaluation
    #[arg(long, env = "PIPELINE_SEQUENTIAL")]
    sequential: bool,

    /// Print per-stage progress lines
    #[arg(long, env = "PIPELINE_VERBOSE")]
    verbose: bool,

    /// Write the run report as JSON to this path
    #[arg(long, env = "PIPELINE_REPORT_JSON")]
    report_json: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Build the feed config with CLI/env overrides.
fn build_run_config(args: &Args) -> RunConfig {
    let mut config = RunConfig::default();

    if let Some(symbols) = &args.symbols {
        config.symbols = symbols
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(docs) = args.docs_per_day {
        config.docs_per_day = docs;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    config
}

/// Build the pipeline config with CLI/env overrides.
fn build_pipeline_config(args: &Args) -> PipelineConfig {
    let mut config = if args.daily { PipelineConfig::daily() } else { PipelineConfig::default() };

    if args.raw_join {
        config = config.with_join_policy(SentimentJoinPolicy::ReindexRaw);
    }
    if let Some(days) = args.recency_days {
        config = config.with_recency_days(Some(days));
    }
    if let Some(splits) = args.splits {
        config = config.with_n_splits(splits);
    }
    if let Some(min) = args.min_samples {
        config = config.with_min_samples(Some(min));
    }

    config.with_force_sequential(args.sequential).with_verbose(args.verbose)
}

// ─────────────────────────────────────────────────────────────────────────────
// Console Output
// ─────────────────────────────────────────────────────────────────────────────

/// Print the settings box ahead of the run.
fn print_banner(run_config: &RunConfig, pipeline_config: &PipelineConfig) {
    let symbols = run_config.symbols.join(", ");
    let mode = if pipeline_config.force_sequential { "sequential" } else { "parallel" };

    eprintln!("╔════════════════════════════════════════════════════════════════════════╗");
    eprintln!("║  Sentiment Pipeline - Synthetic Feed Demo                              ║");
    eprintln!("╠════════════════════════════════════════════════════════════════════════╣");
    eprintln!("║  Symbols: {:<60} ║", symbols);
    eprintln!(
        "║  History: {:>4} days  │  Docs/day: {:>3}  │  Seed: {:<22} ║",
        run_config.days, run_config.docs_per_day, run_config.seed
    );
    eprintln!(
        "║  Cadence: {:<8}  │  Join: {:<22}  │  Folds: {:>2}       ║",
        pipeline_config.cadence.to_string(),
        pipeline_config.join_policy.to_string(),
        pipeline_config.n_splits
    );
    eprintln!(
        "║  Min bars/symbol: {:>3}  │  Required samples: {:>3}  │  Mode: {:<12} ║",
        pipeline_config.min_bars_per_symbol(),
        pipeline_config.required_samples(),
        mode
    );
    if let Some(days) = pipeline_config.recency_days {
        eprintln!(
            "║  Recency window: {:>4} days                                             ║",
            days
        );
    }
    eprintln!("╚════════════════════════════════════════════════════════════════════════╝");
    eprintln!();
}

/// Print the completion box: run counters, per-symbol scores, best symbol.
fn print_results(
    outcome: &RunOutcome,
    snapshot: &RecorderSnapshot,
    lambda: f64,
    elapsed: std::time::Duration,
) {
    let report = &outcome.report;
    let model_name = outcome.models.first().map(|(_, model)| model.name()).unwrap_or("-");

    eprintln!();
    eprintln!("╔════════════════════════════════════════════════════════════════════════╗");
    eprintln!("║  Run Complete                                                          ║");
    eprintln!("╠════════════════════════════════════════════════════════════════════════╣");
    eprintln!(
        "║  Documents scored: {:>6}  │  Sentiment points: {:>6}  │  {:>6.2}s     ║",
        snapshot.scored_documents,
        snapshot.series_points,
        elapsed.as_secs_f64()
    );
    eprintln!(
        "║  Model: {:<8} (lambda {:<6.2})  │  Evaluated: {:>3}  │  Skipped: {:>3}   ║",
        model_name,
        lambda,
        report.evaluated.len(),
        report.skipped.len()
    );
    eprintln!("╠════════════════════════════════════════════════════════════════════════╣");
    for symbol in &report.evaluated {
        eprintln!(
            "║  {:<6} {:>5} samples  {:>2} folds  test R2 {:+.4}  test MSE {:>10.6}  ║",
            symbol.symbol, symbol.samples, symbol.folds, symbol.avg_test_r2, symbol.avg_test_mse
        );
    }
    for skip in &report.skipped {
        eprintln!("║  {:<6} skipped: {:<53} ║", skip.symbol, skip.reason.to_string());
    }
    if let Some(best) = report.best_symbol() {
        let features: Vec<String> = best
            .feature_importances
            .iter()
            .take(3)
            .map(|(name, weight)| format!("{} {:.3}", name, weight))
            .collect();
        eprintln!("╠════════════════════════════════════════════════════════════════════════╣");
        eprintln!(
            "║  Best: {:<6} test R2 {:+.4}                                              ║",
            best.symbol, best.avg_test_r2
        );
        eprintln!("║  Top features: {:<55} ║", features.join("  │  "));
    }
    eprintln!("╚════════════════════════════════════════════════════════════════════════╝");
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Point
// ─────────────────────────────────────────────────────────────────────────────

fn run(args: Args) -> pipeline::Result<()> {
    let run_config = build_run_config(&args);
    let pipeline_config = build_pipeline_config(&args);
    let lambda = args.lambda.unwrap_or(DEFAULT_LAMBDA);

    print_banner(&run_config, &pipeline_config);

    let input = datagen::generate(&run_config);

    let recorder = Arc::new(RunRecorder::default());
    let mut pipeline = Pipeline::new(pipeline_config);
    pipeline.add_hook(recorder.clone());

    let factory = RidgeRegressor::factory(lambda);
    let start = Instant::now();
    let outcome = pipeline.run(input, &factory)?;
    let elapsed = start.elapsed();

    print_results(&outcome, &recorder.snapshot(), lambda, elapsed);

    if let Some(path) = &args.report_json {
        outcome.report.write_json(path)?;
        eprintln!();
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

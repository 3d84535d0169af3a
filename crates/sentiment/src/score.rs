//! Polarity scoring of cleaned document text.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use types::{RawDocument, Source};

use crate::clean::TextCleaner;

/// A document reduced to the pieces the aggregator needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument {
    /// Canonical UTC timestamp.
    pub timestamp: DateTime<Utc>,
    pub source: Source,
    /// Polarity in [-1, 1].
    pub score: f64,
}

/// Assigns a scalar polarity in [-1, 1] to normalized text.
///
/// Implementations must be pure functions of the text. The pipeline treats
/// the scorer as a replaceable collaborator, so external models plug in
/// here without touching the aggregation path.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
    fn name(&self) -> &str;
}

// =============================================================================
// Lexicon Scorer
// =============================================================================

/// Word valences, finance-leaning. Scores average over matched words.
const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("gain", 0.5), ("gains", 0.5), ("gained", 0.5), ("surge", 0.8), ("surges", 0.8),
    ("surged", 0.8), ("soar", 0.9), ("soars", 0.9), ("soared", 0.9), ("rally", 0.7),
    ("rallies", 0.7), ("rallied", 0.7), ("jump", 0.6), ("jumps", 0.6), ("jumped", 0.6),
    ("climb", 0.5), ("climbs", 0.5), ("climbed", 0.5), ("rise", 0.4), ("rises", 0.4),
    ("rose", 0.4), ("beat", 0.6), ("beats", 0.6), ("strong", 0.6), ("stronger", 0.6),
    ("strongest", 0.7), ("record", 0.5), ("upgrade", 0.7), ("upgraded", 0.7),
    ("upbeat", 0.6), ("bullish", 0.8), ("buy", 0.4), ("outperform", 0.7),
    ("outperforms", 0.7), ("profit", 0.5), ("profits", 0.5), ("profitable", 0.6),
    ("growth", 0.5), ("growing", 0.5), ("grew", 0.4), ("boom", 0.7), ("booming", 0.8),
    ("optimistic", 0.6), ("optimism", 0.6), ("positive", 0.5), ("win", 0.5),
    ("wins", 0.5), ("winner", 0.6), ("success", 0.6), ("successful", 0.6),
    ("breakthrough", 0.8), ("innovative", 0.5), ("robust", 0.5), ("solid", 0.4),
    ("healthy", 0.4), ("momentum", 0.3), ("recovery", 0.5), ("recover", 0.4),
    ("recovers", 0.4), ("rebound", 0.6), ("rebounds", 0.6), ("rebounded", 0.6),
    ("exceeds", 0.6), ("exceeded", 0.6), ("impressive", 0.6), ("stellar", 0.8),
    ("great", 0.6), ("good", 0.4), ("best", 0.7), ("higher", 0.3), ("highs", 0.4),
    ("advance", 0.4), ("advances", 0.4), ("expand", 0.4), ("expands", 0.4),
    ("expansion", 0.5), ("accelerate", 0.5), ("accelerating", 0.5), ("dividend", 0.3),
    ("buyback", 0.4), ("blowout", 0.7), ("topped", 0.6), ("tops", 0.5),
    // Negative
    ("loss", -0.5), ("losses", -0.5), ("lose", -0.5), ("loses", -0.5), ("lost", -0.5),
    ("plunge", -0.8), ("plunges", -0.8), ("plunged", -0.8), ("crash", -0.9),
    ("crashes", -0.9), ("crashed", -0.9), ("collapse", -0.9), ("collapses", -0.9),
    ("collapsed", -0.9), ("tumble", -0.7), ("tumbles", -0.7), ("tumbled", -0.7),
    ("slump", -0.7), ("slumps", -0.7), ("slumped", -0.7), ("slide", -0.5),
    ("slides", -0.5), ("slid", -0.5), ("fall", -0.4), ("falls", -0.4), ("fell", -0.4),
    ("drop", -0.4), ("drops", -0.4), ("dropped", -0.5), ("decline", -0.4),
    ("declines", -0.4), ("declined", -0.4), ("weak", -0.5), ("weaker", -0.6),
    ("weakest", -0.7), ("miss", -0.6), ("misses", -0.6), ("missed", -0.6),
    ("downgrade", -0.7), ("downgraded", -0.7), ("bearish", -0.8), ("sell", -0.4),
    ("selloff", -0.7), ("underperform", -0.7), ("underperforms", -0.7),
    ("warning", -0.6), ("warns", -0.6), ("warned", -0.6), ("cuts", -0.4),
    ("layoffs", -0.7), ("lawsuit", -0.6), ("probe", -0.5), ("investigation", -0.5),
    ("fraud", -0.9), ("scandal", -0.8), ("bankruptcy", -0.9), ("bankrupt", -0.9),
    ("recession", -0.7), ("fears", -0.6), ("fear", -0.5), ("worry", -0.5),
    ("worries", -0.5), ("worried", -0.5), ("pessimistic", -0.6), ("negative", -0.5),
    ("risk", -0.3), ("risks", -0.3), ("risky", -0.4), ("volatile", -0.3),
    ("uncertainty", -0.4), ("uncertain", -0.4), ("trouble", -0.5), ("troubled", -0.6),
    ("struggle", -0.5), ("struggles", -0.5), ("struggling", -0.6),
    ("disappointing", -0.7), ("disappoints", -0.6), ("disappointed", -0.6),
    ("bad", -0.5), ("worst", -0.8), ("lower", -0.3), ("lows", -0.4),
    ("shortfall", -0.6), ("halted", -0.5), ("suspended", -0.5), ("recall", -0.5),
    ("breach", -0.6), ("downturn", -0.6), ("crisis", -0.8), ("slowdown", -0.5),
];

/// Default scorer: mean valence of lexicon hits, clamped to [-1, 1].
/// Text with no hit scores neutral 0.0.
pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self { valences: LEXICON.iter().copied().collect() }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let mut sum = 0.0;
        let mut hits = 0usize;
        for word in text.split_whitespace() {
            if let Some(valence) = self.valences.get(word) {
                sum += valence;
                hits += 1;
            }
        }
        if hits == 0 {
            return 0.0;
        }
        (sum / hits as f64).clamp(-1.0, 1.0)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

// =============================================================================
// Document Scoring
// =============================================================================

/// Clean and score one document, canonicalizing its timestamp to UTC.
pub fn score_document(
    doc: &RawDocument,
    cleaner: &dyn TextCleaner,
    scorer: &dyn SentimentScorer,
) -> ScoredDocument {
    let cleaned = cleaner.clean(&doc.text);
    ScoredDocument {
        timestamp: align::canonical_utc(doc.timestamp),
        source: doc.source,
        score: scorer.score(&cleaned),
    }
}

/// Score a batch in input order.
pub fn score_documents(
    docs: &[RawDocument],
    cleaner: &dyn TextCleaner,
    scorer: &dyn SentimentScorer,
) -> Vec<ScoredDocument> {
    docs.iter().map(|doc| score_document(doc, cleaner, scorer)).collect()
}

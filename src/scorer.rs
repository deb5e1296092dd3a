//! Tokenization and lexicon-based affect scoring
//!
//! Scoring is strictly bag-of-words: every token found in the lexicon
//! contributes its three dimension ratings, and the unit's score is the
//! per-dimension arithmetic mean. There is no negation handling, no
//! multi-word expressions, and no language detection.

use crate::error::Error;
use crate::lexicon::LexiconStore;
use crate::types::{ScoreResult, Sentiment};
use regex::Regex;

/// The lexicon's documented neutral midpoint on the pleasure dimension
///
/// A unit is labeled positive only when its mean pleasure is strictly above
/// this value; a mean of exactly the midpoint is negative.
pub const PLEASURE_MIDPOINT: f64 = 50.0;

/// Word token pattern: any run of alphanumeric/underscore characters
///
/// `\w` is Unicode-aware, so letters outside ASCII count as word characters.
const WORD_TOKEN_PATTERN: &str = r"\b\w+\b";

/// Scores text against an injected lexicon
pub struct AffectScorer {
    word_re: Regex,
    positive_threshold: f64,
}

impl AffectScorer {
    /// Create a scorer with the default threshold ([`PLEASURE_MIDPOINT`])
    pub fn new() -> Result<Self, Error> {
        Self::with_threshold(PLEASURE_MIDPOINT)
    }

    /// Create a scorer with a custom positive threshold
    pub fn with_threshold(positive_threshold: f64) -> Result<Self, Error> {
        let word_re = Regex::new(WORD_TOKEN_PATTERN)
            .map_err(|e| Error::Other(format!("failed to compile token pattern: {e}")))?;
        Ok(Self {
            word_re,
            positive_threshold,
        })
    }

    /// The threshold above which mean pleasure is labeled positive
    pub fn positive_threshold(&self) -> f64 {
        self.positive_threshold
    }

    /// Split text into lowercase word tokens
    ///
    /// Punctuation and whitespace separate tokens; empty input yields an
    /// empty sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word_re
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Score one unit of text against the lexicon
    ///
    /// Returns the [`ScoreResult::empty`] sentinel when no token matched any
    /// lexicon entry. Scoring is deterministic: the same text and lexicon
    /// always produce the same result.
    pub fn score(&self, text: &str, lexicon: &LexiconStore) -> ScoreResult {
        let mut pleasure = Vec::new();
        let mut arousal = Vec::new();
        let mut dominance = Vec::new();

        for token in self.tokenize(text) {
            if let Some(entry) = lexicon.lookup(&token) {
                pleasure.push(entry.pleasure);
                arousal.push(entry.arousal);
                dominance.push(entry.dominance);
            }
        }

        if pleasure.is_empty() && arousal.is_empty() && dominance.is_empty() {
            return ScoreResult::empty();
        }

        let pleasure = mean(&pleasure);
        let sentiment = if pleasure > self.positive_threshold {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };

        ScoreResult {
            pleasure,
            arousal: mean(&arousal),
            dominance: mean(&dominance),
            sentiment,
        }
    }
}

/// Arithmetic mean, defaulting to 0.0 for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

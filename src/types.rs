//! Core types for affect-harvest

use serde::{Deserialize, Serialize};

/// Which field of a parent item a unit was extracted from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// The parent's display title
    Title,
    /// The parent's self-text body
    Body,
    /// One comment on the parent
    Comment,
}

impl UnitKind {
    /// Wire label for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Title => "title",
            UnitKind::Body => "body",
            UnitKind::Comment => "comment",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-unit sentiment label
///
/// `Empty` means zero lexicon coverage — the text contained no recognized
/// term. It is distinct from a genuinely negative score.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Mean pleasure strictly above the threshold
    Positive,
    /// Mean pleasure at or below the threshold
    Negative,
    /// No lexicon term matched
    Empty,
}

impl Sentiment {
    /// Wire label for this sentiment
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Empty => "empty",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-parent consensus label derived by majority vote
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consensus {
    /// Majority of the parent's decided unit labels is positive
    #[serde(rename = "positive")]
    Positive,
    /// Majority of the parent's decided unit labels is negative
    #[serde(rename = "negative")]
    Negative,
    /// The parent had no units with a decided label
    #[serde(rename = "not enough data")]
    NotEnoughData,
}

impl Consensus {
    /// Wire label for this consensus
    pub fn as_str(&self) -> &'static str {
        match self {
            Consensus::Positive => "positive",
            Consensus::Negative => "negative",
            Consensus::NotEnoughData => "not enough data",
        }
    }
}

impl std::fmt::Display for Consensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Sentiment> for Consensus {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Consensus::Positive,
            Sentiment::Negative => Consensus::Negative,
            Sentiment::Empty => Consensus::NotEnoughData,
        }
    }
}

/// One collected parent item with its comments attached
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    /// Display title (may be empty)
    pub title: String,

    /// Self-text body (may be empty)
    pub selftext: String,

    /// Creation timestamp in epoch seconds, if the source provided one
    pub created_utc: Option<i64>,

    /// Permalink used to fetch the comment thread
    pub permalink: Option<String>,

    /// Comment bodies, in thread order
    pub comments: Vec<String>,
}

/// One scorable piece of text extracted from a parent item
///
/// Created by the collector when flattening posts and never mutated after.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    /// Index of the parent post within the collected batch
    pub parent_index: usize,

    /// Title of the parent post
    pub parent_title: String,

    /// Parent creation timestamp in epoch seconds, if present
    pub created_utc: Option<i64>,

    /// Which field the text came from
    pub kind: UnitKind,

    /// The text, trimmed and non-empty
    pub text: String,
}

/// Affect scores for one unit of text
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Mean pleasure over matched terms (0.0 when nothing matched)
    pub pleasure: f64,

    /// Mean arousal over matched terms (0.0 when nothing matched)
    pub arousal: f64,

    /// Mean dominance over matched terms (0.0 when nothing matched)
    pub dominance: f64,

    /// Derived sentiment label
    pub sentiment: Sentiment,
}

impl ScoreResult {
    /// The sentinel result for text with zero lexicon coverage
    pub fn empty() -> Self {
        Self {
            pleasure: 0.0,
            arousal: 0.0,
            dominance: 0.0,
            sentiment: Sentiment::Empty,
        }
    }
}

/// One row of the per-unit output table
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoredUnit {
    /// Title of the parent post
    pub parent_title: String,

    /// Parent creation timestamp in epoch seconds, if present
    pub created_utc: Option<i64>,

    /// Which field the text came from
    pub kind: UnitKind,

    /// Derived sentiment label
    pub sentiment: Sentiment,

    /// Mean pleasure over matched terms
    pub pleasure: f64,

    /// Mean arousal over matched terms
    pub arousal: f64,

    /// Mean dominance over matched terms
    pub dominance: f64,

    /// The scored text
    pub text: String,
}

impl ScoredUnit {
    /// Combine a unit with its score into a table row
    pub fn new(unit: &Unit, score: &ScoreResult) -> Self {
        Self {
            parent_title: unit.parent_title.clone(),
            created_utc: unit.created_utc,
            kind: unit.kind,
            sentiment: score.sentiment,
            pleasure: score.pleasure,
            arousal: score.arousal,
            dominance: score.dominance,
            text: unit.text.clone(),
        }
    }
}

/// Per-post consensus row
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostSentiment {
    /// Post title
    pub title: String,

    /// Post creation timestamp in epoch seconds, if present
    pub created_utc: Option<i64>,

    /// Majority-vote consensus over the post's decided unit labels
    pub sentiment: Consensus,

    /// Number of comments that were collected for the post
    pub comments_count: usize,
}

//! Unit scoring and summary aggregation
//!
//! Every unit is scored independently, so there is no shared state between
//! scorings; the table keeps the units' original order, which is an
//! observable contract for reproducible output.

use crate::collector::flatten_units;
use crate::config::ScoringConfig;
use crate::error::Error;
use crate::lexicon::LexiconStore;
use crate::scorer::AffectScorer;
use crate::types::{Consensus, Post, PostSentiment, ScoredUnit, Sentiment};
use std::collections::BTreeMap;

/// Aggregated output of one scoring pass
#[derive(Clone, Debug)]
pub struct Aggregation {
    /// Global histogram of unit sentiment labels
    pub summary: BTreeMap<Sentiment, usize>,

    /// Per-unit score table, in original unit order
    pub units: Vec<ScoredUnit>,

    /// Per-post consensus rows, in collection order
    pub posts: Vec<PostSentiment>,
}

/// Scores collected posts and rolls the results up
pub struct Aggregator {
    scorer: AffectScorer,
    count_empty_units: bool,
}

impl Aggregator {
    /// Create an aggregator from the scoring configuration
    pub fn new(config: &ScoringConfig) -> Result<Self, Error> {
        Ok(Self {
            scorer: AffectScorer::with_threshold(config.positive_threshold)?,
            count_empty_units: config.count_empty_units,
        })
    }

    /// Score every unit of every post and aggregate the labels
    ///
    /// The histogram counts unit labels; whether zero-coverage units
    /// participate is governed by `count_empty_units`. Each post also gets a
    /// majority-vote consensus over its decided unit labels.
    pub fn aggregate(&self, posts: &[Post], lexicon: &LexiconStore) -> Aggregation {
        let units = flatten_units(posts);

        let mut summary = BTreeMap::new();
        let mut scored = Vec::with_capacity(units.len());
        let mut labels_per_post: Vec<Vec<Sentiment>> = vec![Vec::new(); posts.len()];

        for unit in &units {
            let score = self.scorer.score(&unit.text, lexicon);

            if score.sentiment != Sentiment::Empty || self.count_empty_units {
                *summary.entry(score.sentiment).or_insert(0) += 1;
            }
            labels_per_post[unit.parent_index].push(score.sentiment);
            scored.push(ScoredUnit::new(unit, &score));
        }

        let posts = posts
            .iter()
            .zip(labels_per_post)
            .map(|(post, labels)| PostSentiment {
                title: post.title.clone(),
                created_utc: post.created_utc,
                sentiment: majority_vote(labels),
                comments_count: post.comments.len(),
            })
            .collect();

        tracing::debug!(units = scored.len(), "aggregation finished");

        Aggregation {
            summary,
            units: scored,
            posts,
        }
    }
}

/// Majority vote over unit labels, ignoring `Empty`
///
/// Ties are broken by whichever label was encountered first in the input
/// order, which keeps the result stable and deterministic. No decided label
/// at all yields [`Consensus::NotEnoughData`].
pub fn majority_vote(labels: impl IntoIterator<Item = Sentiment>) -> Consensus {
    let mut counts: Vec<(Sentiment, usize)> = Vec::new();

    for label in labels {
        if label == Sentiment::Empty {
            continue;
        }
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut winner: Option<(Sentiment, usize)> = None;
    for (label, count) in counts {
        // strictly greater: on equal counts the earlier label stands
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((label, count));
        }
    }

    match winner {
        Some((label, _)) => Consensus::from(label),
        None => Consensus::NotEnoughData,
    }
}

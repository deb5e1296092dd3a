//! Serializable run output
//!
//! The report carries the label summary, the per-post consensus rows, and
//! the full per-unit score table. JSON output goes through a temporary
//! sibling path that is renamed into place on completion, so a crash mid-run
//! never leaves a half-written report behind.

use crate::aggregator::Aggregation;
use crate::error::Result;
use crate::types::{PostSentiment, ScoredUnit, Sentiment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Aggregated sentiment output for one harvest run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentReport {
    /// The query the run was collected for
    pub query: String,

    /// Sentiment label counts over all scored units
    pub summary: BTreeMap<Sentiment, usize>,

    /// Per-post consensus rows, in collection order
    pub posts: Vec<PostSentiment>,

    /// Per-unit score table, in original unit order
    pub units: Vec<ScoredUnit>,
}

impl SentimentReport {
    /// Build a report from an aggregation pass
    pub fn from_aggregation(query: &str, aggregation: Aggregation) -> Self {
        Self {
            query: query.to_string(),
            summary: aggregation.summary,
            posts: aggregation.posts,
            units: aggregation.units,
        }
    }

    /// Write the report as pretty JSON
    ///
    /// The bytes land in `<path>.tmp` first and are renamed over `path` once
    /// fully written.
    pub async fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self)?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::info!(path = %path.display(), bytes = json.len(), "report written");
        Ok(())
    }
}

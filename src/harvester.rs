//! Top-level pipeline orchestration
//!
//! A [`Harvester`] owns the configuration, the injected lexicon, and the
//! collection/aggregation machinery. One [`run`](Harvester::run) call
//! executes the whole pipeline: collect the listing, fetch comments, flatten
//! to units, score, and aggregate into a report.

use crate::aggregator::Aggregator;
use crate::collector::Collector;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::FetchClient;
use crate::lexicon::LexiconStore;
use crate::report::SentimentReport;

/// Orchestrates collection, scoring, and aggregation
pub struct Harvester {
    config: Config,
    lexicon: LexiconStore,
    collector: Collector,
    aggregator: Aggregator,
}

impl Harvester {
    /// Create a harvester over the production HTTP transport
    ///
    /// The lexicon is injected, not loaded here — load it first with
    /// [`LexiconStore::load`] so a broken lexicon aborts before any fetch.
    pub fn new(config: Config, lexicon: LexiconStore) -> Result<Self> {
        let client = FetchClient::new(&config.source, config.retry.clone())?;
        Self::with_client(config, lexicon, client)
    }

    /// Create a harvester over a custom fetch client (used by tests)
    pub fn with_client(config: Config, lexicon: LexiconStore, client: FetchClient) -> Result<Self> {
        let collector = Collector::new(client, config.source.clone())?;
        let aggregator = Aggregator::new(&config.scoring)?;

        Ok(Self {
            config,
            lexicon,
            collector,
            aggregator,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one query
    pub async fn run(&self, query: &str) -> Result<SentimentReport> {
        tracing::info!(query, "starting harvest");

        let posts = self
            .collector
            .collect(query, self.config.source.page_size)
            .await?;

        let aggregation = self.aggregator.aggregate(&posts, &self.lexicon);
        tracing::info!(
            posts = aggregation.posts.len(),
            units = aggregation.units.len(),
            "harvest finished"
        );

        Ok(SentimentReport::from_aggregation(query, aggregation))
    }
}

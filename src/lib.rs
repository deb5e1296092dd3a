//! # affect-harvest
//!
//! Backend library for collecting forum text and scoring its affective
//! valence against a fixed psycholinguistic lexicon.
//!
//! ## Design Philosophy
//!
//! affect-harvest is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Polite by default** - Bounded retries with linear backoff and a hard
//!   inter-request delay, so the remote service is never hammered
//! - **Deterministic** - Scoring and aggregation are pure over their inputs,
//!   and output ordering is stable
//! - **Test-friendly** - The lexicon is injected and the HTTP layer sits
//!   behind a trait, so everything runs against fakes
//!
//! ## Quick Start
//!
//! ```no_run
//! use affect_harvest::{Config, Harvester, LexiconStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lexicon = LexiconStore::load("data/anew.csv")?;
//!     let harvester = Harvester::new(Config::default(), lexicon)?;
//!
//!     let report = harvester.run("rust").await?;
//!     println!("{:?}", report.summary);
//!
//!     report.write_json("data/rust_sentiment.json").await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Unit scoring and summary aggregation
pub mod aggregator;
/// Listing collection and unit flattening
pub mod collector;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Retrying HTTP fetch client
pub mod fetch;
/// Pipeline orchestration
pub mod harvester;
/// Affect lexicon loading and lookup
pub mod lexicon;
/// Serializable run output
pub mod report;
/// Retry logic with linear backoff
pub mod retry;
/// Tokenization and affect scoring
pub mod scorer;
/// Core types
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use aggregator::{Aggregation, Aggregator, majority_vote};
pub use collector::{Collector, flatten_units};
pub use config::{Config, RetryConfig, ScoringConfig, SourceConfig};
pub use error::{Error, FetchError, LexiconError, Result, TransportError};
pub use fetch::{FetchClient, HttpResponse, RETRYABLE_STATUS, ReqwestTransport, Transport};
pub use harvester::Harvester;
pub use lexicon::{LexiconEntry, LexiconStore};
pub use report::SentimentReport;
pub use retry::{IsRetryable, fetch_with_retry};
pub use scorer::{AffectScorer, PLEASURE_MIDPOINT};
pub use types::{
    Consensus, Post, PostSentiment, ScoreResult, ScoredUnit, Sentiment, Unit, UnitKind,
};

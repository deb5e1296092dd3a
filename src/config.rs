//! Configuration types for affect-harvest

use crate::scorer::PLEASURE_MIDPOINT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Data source configuration (endpoint, paging, politeness)
///
/// Groups settings related to how listings and comment threads are fetched.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the forum API (default: "https://www.reddit.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    ///
    /// The remote service throttles requests carrying no or default-library
    /// user agents, so a browser-style value is the default.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Number of listing items requested per page (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum listing pages to follow via the pagination cursor (default: 1)
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Only keep parents newer than this many days (default: 30)
    ///
    /// `None` disables the age window entirely. When the window is active, a
    /// parent without a creation timestamp is skipped.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: Option<u32>,

    /// Delay applied after every comment fetch (default: 1 second)
    ///
    /// This respects the remote service's implicit rate limit and runs even
    /// when the fetch succeeded.
    #[serde(default = "default_politeness_delay", with = "duration_serde")]
    pub politeness_delay: Duration,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            max_age_days: default_max_age_days(),
            politeness_delay: default_politeness_delay(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Retry configuration for transient fetch failures
///
/// Backoff is linear: the delay before retry `n` is `backoff_base * n`.
/// The schedule is deliberately jitter-free so test timing is reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay scaled by the attempt number (default: 1 second)
    #[serde(default = "default_backoff_base", with = "duration_serde")]
    pub backoff_base: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// Scoring and aggregation configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Mean-pleasure threshold above which a unit is labeled positive
    /// (default: 50.0, the lexicon's neutral midpoint)
    ///
    /// The comparison is strict: a mean of exactly the threshold is negative.
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,

    /// Count zero-coverage ("empty") units in the summary histogram
    /// (default: false)
    #[serde(default)]
    pub count_empty_units: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_threshold: default_positive_threshold(),
            count_empty_units: false,
        }
    }
}

/// Main configuration for the harvester
///
/// Fields are organized into logical sub-configs:
/// - [`source`](SourceConfig) — endpoint, paging, politeness
/// - [`retry`](RetryConfig) — attempt limit and backoff schedule
/// - [`scoring`](ScoringConfig) — label threshold and histogram policy
///
/// All sub-config fields are flattened for serialization, so the JSON/TOML
/// format stays flat (no nesting).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data source settings
    #[serde(flatten)]
    pub source: SourceConfig,

    /// Retry settings for transient fetch failures
    #[serde(flatten)]
    pub retry: RetryConfig,

    /// Scoring and aggregation settings
    #[serde(flatten)]
    pub scoring: ScoringConfig,
}

fn default_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 15_0)".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_max_pages() -> u32 {
    1
}

fn default_max_age_days() -> Option<u32> {
    Some(30)
}

fn default_politeness_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base() -> Duration {
    Duration::from_secs(1)
}

fn default_positive_threshold() -> f64 {
    PLEASURE_MIDPOINT
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();

        assert_eq!(config.source.base_url, "https://www.reddit.com");
        assert_eq!(config.source.page_size, 100);
        assert_eq!(config.source.max_pages, 1);
        assert_eq!(config.source.max_age_days, Some(30));
        assert_eq!(config.source.politeness_delay, Duration::from_secs(1));
        assert_eq!(config.source.request_timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_base, Duration::from_secs(1));
        assert_eq!(config.scoring.positive_threshold, 50.0);
        assert!(!config.scoring.count_empty_units);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.source.page_size, 100);
        assert_eq!(config.retry.max_attempts, 3);
        assert!(!config.scoring.count_empty_units);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config: Config = serde_json::from_str(
            r#"{"base_url": "http://localhost:8080", "max_attempts": 5, "politeness_delay": 2}"#,
        )
        .unwrap();

        assert_eq!(config.source.base_url, "http://localhost:8080");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.source.politeness_delay, Duration::from_secs(2));
        // untouched fields keep their defaults
        assert_eq!(config.source.page_size, 100);
        assert_eq!(config.scoring.positive_threshold, 50.0);
    }

    #[test]
    fn durations_serialize_as_whole_seconds() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["politeness_delay"], 1);
        assert_eq!(json["backoff_base"], 1);
        assert_eq!(json["request_timeout"], 30);
    }

    #[test]
    fn max_age_days_null_disables_window() {
        let config: Config = serde_json::from_str(r#"{"max_age_days": null}"#).unwrap();
        assert_eq!(config.source.max_age_days, None);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = Config::default();
        config.source.max_pages = 4;
        config.scoring.count_empty_units = true;

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(back.source.max_pages, 4);
        assert!(back.scoring.count_empty_units);
    }
}

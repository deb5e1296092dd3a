//! Error types for affect-harvest
//!
//! This module provides the error taxonomy for the library:
//! - `LexiconError` — the lexicon source is missing or malformed (fatal, the
//!   pipeline aborts before any fetch happens)
//! - `FetchError` — an HTTP fetch failed, with transient/fatal classification
//!   driving the retry policy
//! - `TransportError` — a network-level failure below the HTTP status layer
//!   (always transient)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for affect-harvest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for affect-harvest
///
/// This is the primary error type used throughout the library. Each variant
/// includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Lexicon source missing or malformed
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Fetch failed after exhausting retries or with a fatal response
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors raised while loading the affect lexicon
///
/// The store loads atomically: either the full table is built or one of these
/// is returned and no partial state is observable.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Lexicon source could not be opened
    #[error("failed to open lexicon source {path}: {source}")]
    Open {
        /// The path that could not be opened
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A row is malformed (missing column, non-numeric dimension, bad CSV)
    #[error("malformed lexicon row: {0}")]
    Parse(#[from] csv::Error),
}

/// Errors raised by the retrying fetch client
///
/// Variants are classified as transient (retried with backoff) or fatal
/// (surfaced immediately) via [`IsRetryable`](crate::retry::IsRetryable).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure below the HTTP status layer (transient)
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Server returned a status in the retryable set (transient)
    #[error("retryable HTTP status {status}")]
    RetryableStatus {
        /// The HTTP status code that was returned
        status: u16,
    },

    /// Server returned a non-200 status outside the retryable set (fatal)
    #[error("HTTP status {status} is not retryable")]
    FatalStatus {
        /// The HTTP status code that was returned
        status: u16,
    },

    /// A 200 response carried a non-JSON content type (fatal)
    #[error("expected a JSON response, got content type {content_type:?}")]
    NotJson {
        /// The content type the server reported, if any
        content_type: Option<String>,
    },

    /// The response body could not be parsed as JSON (fatal)
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The response parsed as JSON but did not have the expected shape (fatal)
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Network-level transport failures
///
/// These occur before any HTTP status is available (timeouts, refused or
/// dropped connections) and are always treated as transient.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request timed out
    #[error("request timed out")]
    Timeout,

    /// The connection failed or was interrupted
    #[error("connection failed: {0}")]
    Connection(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connection(e.to_string())
        }
    }
}

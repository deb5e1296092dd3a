//! Retrying HTTP fetch client
//!
//! [`FetchClient::get_json`] performs a GET and returns the parsed JSON body,
//! retrying transient failures with the linear backoff schedule from
//! [`crate::retry`]. Outcomes are classified per attempt:
//!
//! - network-level failure (timeout, connection error) → transient, retried
//! - HTTP 200 with a JSON content type → success
//! - status in {429, 500, 502, 503, 504} → transient, retried
//! - any other non-200 status, or a 200 with a non-JSON content type →
//!   fatal, surfaced immediately with no retry
//!
//! The HTTP layer sits behind the [`Transport`] trait so tests can script
//! responses without a live server.

use crate::config::{RetryConfig, SourceConfig};
use crate::error::{Error, FetchError, TransportError};
use crate::retry::fetch_with_retry;
use async_trait::async_trait;

/// HTTP statuses classified as transient
pub const RETRYABLE_STATUS: [u16; 5] = [429, 500, 502, 503, 504];

/// A raw HTTP response, before classification
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if present
    pub content_type: Option<String>,
    /// Response body
    pub body: String,
}

/// Minimal HTTP GET seam
///
/// The production implementation wraps `reqwest`; tests substitute scripted
/// fakes. Transport errors cover only network-level failures — any response
/// with a status, however unwelcome, is an `Ok(HttpResponse)`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one GET request with the given query parameters
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the configured timeout and user agent
    pub fn new(config: &SourceConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(TransportError::from)?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// HTTP GET client with retry, backoff, and failure classification
pub struct FetchClient {
    transport: Box<dyn Transport>,
    retry: RetryConfig,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Build a client over the production `reqwest` transport
    pub fn new(source: &SourceConfig, retry: RetryConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(
            Box::new(ReqwestTransport::new(source)?),
            retry,
        ))
    }

    /// Build a client over a custom transport (used by tests)
    pub fn with_transport(transport: Box<dyn Transport>, retry: RetryConfig) -> Self {
        Self { transport, retry }
    }

    /// GET a URL and return its JSON body, retrying transient failures
    ///
    /// Fatal outcomes (an unexpected status, a non-JSON content type, an
    /// unparseable body) fail immediately. Transient outcomes are retried up
    /// to the configured attempt limit; when attempts run out the last
    /// transient error is returned.
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, FetchError> {
        tracing::debug!(url, "fetching JSON");
        fetch_with_retry(&self.retry, || self.attempt(url, query)).await
    }

    async fn attempt(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, FetchError> {
        let response = self.transport.get(url, query).await?;

        if response.status != 200 {
            return Err(if RETRYABLE_STATUS.contains(&response.status) {
                FetchError::RetryableStatus {
                    status: response.status,
                }
            } else {
                FetchError::FatalStatus {
                    status: response.status,
                }
            });
        }

        let is_json = response
            .content_type
            .as_deref()
            .is_some_and(is_json_content_type);
        if !is_json {
            return Err(FetchError::NotJson {
                content_type: response.content_type,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Whether a Content-Type header denotes a JSON body
///
/// Parameters such as `; charset=UTF-8` are ignored.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence == "text/json" || essence.ends_with("+json")
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedTransport;
    use std::time::Duration;

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            backoff_base: Duration::from_millis(100),
        }
    }

    fn json_response(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            content_type: Some("application/json; charset=UTF-8".to_string()),
            body: body.to_string(),
        })
    }

    #[tokio::test]
    async fn success_returns_parsed_json() {
        let transport = ScriptedTransport::new(vec![json_response(200, r#"{"ok": true}"#)]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let value = client.get_json("http://example/api", &[]).await.unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_parameters_reach_the_transport() {
        let transport = ScriptedTransport::new(vec![json_response(200, "{}")]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        client
            .get_json(
                "http://example/api",
                &[("q", "rust".to_string()), ("limit", "100".to_string())],
            )
            .await
            .unwrap();

        let recorded = calls.lock().unwrap();
        assert_eq!(recorded[0].url, "http://example/api");
        assert_eq!(
            recorded[0].query,
            vec![
                ("q".to_string(), "rust".to_string()),
                ("limit".to_string(), "100".to_string())
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retryable_status_twice_then_success_sleeps_linearly() {
        let transport = ScriptedTransport::new(vec![
            json_response(503, ""),
            json_response(503, ""),
            json_response(200, r#"{"ok": true}"#),
        ]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let value = client.get_json("http://example/api", &[]).await.unwrap();
        assert_eq!(value["ok"], true);

        let recorded = calls.lock().unwrap();
        assert_eq!(recorded.len(), 3, "succeeds on the third attempt");

        // Exactly two sleeps: base*1 then base*2
        assert_eq!(recorded[1].at - recorded[0].at, Duration::from_millis(100));
        assert_eq!(recorded[2].at - recorded[1].at, Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn always_500_fails_after_exactly_max_attempts() {
        let transport = ScriptedTransport::new(vec![
            json_response(500, ""),
            json_response(500, ""),
            json_response(500, ""),
        ]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let err = client.get_json("http://example/api", &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::RetryableStatus { status: 500 }));
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn fatal_status_short_circuits_with_zero_retries() {
        let transport = ScriptedTransport::new(vec![json_response(404, "")]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let err = client.get_json("http://example/api", &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::FatalStatus { status: 404 }));
        assert_eq!(calls.lock().unwrap().len(), 1, "no retry on fatal status");
    }

    #[tokio::test]
    async fn ok_status_with_html_body_is_fatal() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: "<html></html>".to_string(),
        })]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let err = client.get_json("http://example/api", &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::NotJson { .. }));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_content_type_is_fatal() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 200,
            content_type: None,
            body: "{}".to_string(),
        })]);
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let err = client.get_json("http://example/api", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::NotJson { content_type: None }));
    }

    #[tokio::test]
    async fn unparseable_body_is_fatal() {
        let transport = ScriptedTransport::new(vec![json_response(200, "not json")]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let err = client.get_json("http://example/api", &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidJson(_)));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_retried_then_succeeds() {
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::Timeout),
            json_response(200, r#"{"ok": true}"#),
        ]);
        let calls = transport.calls();
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let value = client.get_json("http://example/api", &[]).await.unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_surface_the_last_transient_error() {
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Connection("reset by peer".to_string())),
        ]);
        let client = FetchClient::with_transport(Box::new(transport), fast_retry());

        let err = client.get_json("http://example/api", &[]).await.unwrap_err();

        match err {
            FetchError::Transport(TransportError::Connection(msg)) => {
                assert!(msg.contains("reset by peer"));
            }
            other => panic!("expected the last transport error, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Content-type classification
    // -----------------------------------------------------------------------

    #[test]
    fn json_content_types_are_recognized() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=UTF-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(is_json_content_type("text/json"));
        assert!(is_json_content_type("application/problem+json"));
    }

    #[test]
    fn non_json_content_types_are_rejected() {
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("application/xml"));
        assert!(!is_json_content_type(""));
    }
}

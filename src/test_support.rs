//! Shared helpers for unit tests

use crate::error::TransportError;
use crate::fetch::{HttpResponse, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded transport call
pub(crate) struct RecordedCall {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub at: tokio::time::Instant,
}

/// Transport that replays a scripted queue of responses in call order
/// and records every call with its paused-clock timestamp.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the call log, valid after the transport is boxed away
    pub fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        self.calls.clone()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            at: tokio::time::Instant::now(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("scripted transport ran out of responses at {url}"))
    }
}

/// Shorthand for a 200 JSON response
pub(crate) fn json_ok(body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status: 200,
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    })
}

//! Completion client seam and its reqwest implementation.

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::config::ApiKey;
use crate::upstream::types::ChatRequest;

/// Errors from the single outbound completion call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}")]
    Status { status: u16, body: String },

    /// The call could not be completed (connect, TLS, body read).
    #[error("upstream request failed: {0}")]
    Transport(String),
}

/// Sends one prompt and returns the raw response body text.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        api_key: &'a ApiKey,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<String, UpstreamError>>;
}

/// Chat-completions client over HTTPS.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn send(&self, api_key: &ApiKey, request: &ChatRequest) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Completion API returned an error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Completion received");
        Ok(body)
    }
}

impl CompletionClient for OpenAiClient {
    fn complete<'a>(
        &'a self,
        api_key: &'a ApiKey,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<String, UpstreamError>> {
        Box::pin(self.send(api_key, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_omits_body() {
        let err = UpstreamError::Status {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "upstream returned 429");
    }
}

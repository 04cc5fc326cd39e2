//! Handler error kinds and their HTTP mapping.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Every failure the handler can report. Each kind maps to one status code
/// and one fixed `error` message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or too-short script.
    #[error("Please paste a longer script.")]
    Input,

    /// No API credential configured.
    #[error("Missing OPENAI_API_KEY on server.")]
    Config,

    /// Upstream answered with a non-success status; `detail` is its body.
    #[error("OpenAI error")]
    Upstream { detail: String },

    /// Request body over the configured limit.
    #[error("Script is too large.")]
    TooLarge,

    /// Request did not finish within the configured timeout.
    #[error("Request timed out.")]
    Timeout,

    /// Anything else.
    #[error("Server error")]
    Internal { detail: String },
}

impl ApiError {
    pub fn internal(detail: impl ToString) -> Self {
        Self::Internal {
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Input => StatusCode::BAD_REQUEST,
            Self::Config | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    fn detail(&self) -> Option<&str> {
        match self {
            Self::Upstream { detail } | Self::Internal { detail } => Some(detail),
            Self::Input | Self::Config | Self::TooLarge | Self::Timeout => None,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { body, .. } => Self::Upstream { detail: body },
            UpstreamError::Transport(_) => Self::internal(err),
        }
    }
}

/// JSON error body: `{"error": ..., "detail": ...}`.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Rewrites the plain-text 413 and 408 produced by the body limit and
/// timeout layers into JSON error bodies.
pub async fn json_rejections(response: Response) -> Response {
    let err = match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::TooLarge,
        StatusCode::REQUEST_TIMEOUT => ApiError::Timeout,
        _ => return response,
    };
    tracing::warn!(status = err.status().as_u16(), "Request rejected by middleware");
    err.into_response()
}

/// Converts a handler panic into the generic server error.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(detail = %detail, "Handler panicked");
    ApiError::Internal { detail }.into_response()
}

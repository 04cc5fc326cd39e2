//! The shot-list handler.
//!
//! Control flow is linear: preflight → validate → config check → prompt →
//! upstream call → parse → respond. Every failure is converted to an
//! [`ApiError`] at this boundary.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::Instrument;

use crate::config::GenerationSettings;
use crate::http::error::ApiError;
use crate::http::request::request_id;
use crate::http::response;
use crate::shots::{extract_content, parse_shot_list, prompt, ParsedShots, ShotRequest};
use crate::upstream::{ChatRequest, CompletionClient};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<GenerationSettings>,
    pub client: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(settings: GenerationSettings, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            settings: Arc::new(settings),
            client,
        }
    }
}

/// Entry point for every method and path.
pub async fn generate_shots(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return response::preflight();
    }

    let span = tracing::info_span!(
        "generate_shots",
        request_id = %request_id(&headers),
        method = %method,
    );

    async move {
        match generate(&state, &body).await {
            Ok(parsed) => {
                if parsed.degraded {
                    tracing::warn!("Model content was not JSON; returning empty list");
                }
                response::shot_list(parsed)
            }
            Err(err) => {
                match &err {
                    ApiError::Input => tracing::debug!(body_bytes = body.len(), "Rejected short script"),
                    ApiError::Config => tracing::error!("No API key configured"),
                    ApiError::Upstream { detail } => {
                        tracing::warn!(detail_bytes = detail.len(), "Completion API error")
                    }
                    ApiError::Internal { detail } => tracing::error!(detail = %detail, "Generation failed"),
                    ApiError::TooLarge | ApiError::Timeout => {}
                }
                err.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn generate(state: &AppState, body: &[u8]) -> Result<ParsedShots, ApiError> {
    let request = ShotRequest::from_body(body).ok_or(ApiError::Input)?;
    let api_key = state.settings.api_key.as_ref().ok_or(ApiError::Config)?;

    tracing::debug!(script_chars = request.script.chars().count(), "Requesting shot list");

    let chat = ChatRequest::json(
        state.settings.model.as_str(),
        state.settings.temperature,
        prompt::messages(&request.script),
    );
    let raw = state.client.complete(api_key, &chat).await?;

    let completion: Value = serde_json::from_str(&raw).map_err(ApiError::internal)?;
    let parsed = parse_shot_list(extract_content(&completion));

    tracing::info!(degraded = parsed.degraded, "Shot list generated");
    Ok(parsed)
}

//! Response construction and the headers every response carries.
//!
//! # Responsibilities
//! - Attach the fixed CORS headers to every response, errors included
//! - Build the preflight (204) and success (200) responses
//! - Flag degraded shot lists with a response header
//!
//! # Design Decisions
//! - CORS headers are router layers, so rejections produced by middleware
//!   (timeouts, body limits) carry them too
//! - Headers are overriding: a handler can never drop or alter them

use axum::{
    body::Body,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
        HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::shots::ParsedShots;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Set to `true` when the model's output was replaced by an empty list.
pub const X_SHOT_LIST_DEGRADED: HeaderName = HeaderName::from_static("x-shot-list-degraded");

/// Wrap a router so every response carries the CORS headers.
pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}

/// 204 with an empty body.
pub fn preflight() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// 200 with the shot-list JSON.
pub fn shot_list(parsed: ParsedShots) -> Response {
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json");

    if parsed.degraded {
        response = response.header(X_SHOT_LIST_DEGRADED, "true");
    }

    // Serializing a `serde_json::Value` cannot fail.
    let body = serde_json::to_vec(&parsed.body).unwrap_or_default();
    response
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

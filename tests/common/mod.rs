//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use futures_util::future::BoxFuture;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use shot_list_service::config::{ApiKey, ServiceConfig};
use shot_list_service::upstream::{ChatRequest, CompletionClient, UpstreamError};
use shot_list_service::HttpServer;

pub const SCRIPT: &str = "INT. KITCHEN - NIGHT\nMARA pours coffee. The phone rings. She ignores it.";

/// Completion body wrapping `content` as the first choice.
pub fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
    .to_string()
}

/// Model content for a two-shot list.
pub fn two_shots() -> Value {
    json!({
        "shots": [
            {
                "n": 1,
                "slugline": "INT. KITCHEN - NIGHT",
                "description": "Mara pours coffee.",
                "angle": "MS",
                "movement": "static",
                "location": "Kitchen",
                "time_of_day": "NIGHT",
                "props": ["mug", "coffee pot"],
                "notes": ""
            },
            {
                "n": 2,
                "slugline": "INT. KITCHEN - NIGHT",
                "description": "The phone rings on the counter; she does not look.",
                "angle": "CU",
                "movement": "push-in",
                "location": "Kitchen",
                "time_of_day": "NIGHT",
                "props": ["phone"],
                "notes": "Hold on the unanswered phone."
            }
        ]
    })
}

/// What the fake client answers with.
#[derive(Clone)]
pub enum Reply {
    Body(String),
    Status(u16, String),
    Transport(String),
    /// Never answers.
    Pending,
}

/// Deterministic in-process `CompletionClient`.
pub struct FakeClient {
    reply: Reply,
    calls: Mutex<Vec<(String, ChatRequest)>>,
}

impl FakeClient {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn content(content: &str) -> Arc<Self> {
        Self::new(Reply::Body(completion(content)))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// API key and request of every call so far.
    pub fn calls(&self) -> Vec<(String, ChatRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CompletionClient for FakeClient {
    fn complete<'a>(
        &'a self,
        api_key: &'a ApiKey,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<String, UpstreamError>> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.expose().to_string(), request.clone()));

        let result = match &self.reply {
            Reply::Pending => return Box::pin(futures_util::future::pending()),
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status, body) => Err(UpstreamError::Status {
                status: *status,
                body: body.clone(),
            }),
            Reply::Transport(message) => Err(UpstreamError::Transport(message.clone())),
        };
        Box::pin(async move { result })
    }
}

/// Config with a test credential injected.
pub fn config_with_key() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.api_key = Some(ApiKey::new("sk-test"));
    config
}

/// Router around `client` with `config`.
pub fn router(config: ServiceConfig, client: Arc<FakeClient>) -> Router {
    HttpServer::with_client(config, client).router()
}

/// Drive one request through `router`, returning status, headers and body bytes.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

pub fn post_json(path: &str, body: Value) -> Request<Body> {
    post_raw(path, body.to_string())
}

pub fn post_raw(path: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
}

/// A request seen by the mock completion API.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

/// Start a mock chat-completions API on an ephemeral port that answers every
/// POST to `/v1/chat/completions` with `status` and `body`.
pub async fn start_mock_upstream(
    status: u16,
    body: String,
) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        captured: captured.clone(),
    };

    let app = Router::new()
        .route("/v1/chat/completions", post(mock_completion))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, captured)
}

async fn mock_completion(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let body_json = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.captured.lock().unwrap().push(Captured {
        headers,
        body: body_json,
    });
    (state.status, state.body.clone()).into_response()
}

//! Chat-completion upstream.
//!
//! # Data Flow
//! ```text
//! prompt messages + GenerationSettings
//!     → types.rs (ChatRequest wire body)
//!     → client.rs (CompletionClient::complete, one HTTPS POST)
//!     → raw 2xx body text, or UpstreamError
//! ```
//!
//! # Design Decisions
//! - The handler only sees the `CompletionClient` trait, so tests swap in
//!   a deterministic fake
//! - Exactly one outbound call per request: no retries, no streaming
//! - The API key is passed per call; the client itself holds no credential

pub mod client;
pub mod types;

pub use client::{CompletionClient, OpenAiClient, UpstreamError};
pub use types::{ChatMessage, ChatRequest, ResponseFormat, Role};

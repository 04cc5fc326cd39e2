//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and echoed)
//!     → handler.rs (preflight, validation, upstream call, parsing)
//!     → error.rs / response.rs (status + JSON body)
//!     → response.rs (CORS headers on every response)
//!     → Send to client
//! ```

pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use handler::{generate_shots, AppState};
pub use request::X_REQUEST_ID;
pub use response::X_SHOT_LIST_DEGRADED;
pub use server::HttpServer;

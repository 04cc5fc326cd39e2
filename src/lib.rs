//! Shot-list generation service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod shots;
pub mod upstream;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

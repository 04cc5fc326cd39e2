//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler / upstream client / server
//!     → tracing events (structured fields, request ID span)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the handler span
//! - No metrics: the service emits logs only

pub mod logging;

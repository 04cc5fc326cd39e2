//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, resolve API key from environment)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → GenerationSettings handed to the request handler at construction
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the service runs with no file at all
//! - The API credential never lives in the file; only the name of the
//!   environment variable holding it does
//! - A missing credential is reported per request, not at startup
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiKey, GenerationSettings, LimitsConfig, ListenerConfig, ObservabilityConfig,
    ServiceConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};

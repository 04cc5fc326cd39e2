//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, temperature bounds)
//! - Check the bind address (`ip:port` or `host:port`) and upstream endpoint
//!   are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a host:port address")]
    BindAddress(String),

    #[error("upstream.endpoint '{0}' is not an absolute http(s) URL")]
    Endpoint(String),

    #[error("upstream.model must not be empty")]
    EmptyModel,

    #[error("upstream.temperature {0} is outside 0.0..=2.0")]
    Temperature(f64),

    #[error("upstream.api_key_env must not be empty")]
    EmptyKeyVariable,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let endpoint_ok = Url::parse(&config.upstream.endpoint)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !endpoint_ok {
        errors.push(ValidationError::Endpoint(config.upstream.endpoint.clone()));
    }

    if config.upstream.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModel);
    }

    if !(0.0..=2.0).contains(&config.upstream.temperature) {
        errors.push(ValidationError::Temperature(config.upstream.temperature));
    }

    if config.upstream.api_key_env.trim().is_empty() {
        errors.push(ValidationError::EmptyKeyVariable);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `ip:port`, `[v6]:port` or `host:port`. Host names are resolved at bind time.
fn is_bind_address(address: &str) -> bool {
    if address.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match address.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(':')
                && !host.chars().any(char::is_whitespace)
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = ServiceConfig::default();
        config.upstream.endpoint = "ftp://example.com/v1".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::Endpoint("ftp://example.com/v1".into())]
        );

        config.upstream.endpoint = "not a url".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_host_name_bind_addresses() {
        for address in ["localhost:8080", "service.internal:80", "[::1]:8080", "127.0.0.1:0"] {
            let mut config = ServiceConfig::default();
            config.listener.bind_address = address.into();
            assert!(validate_config(&config).is_ok(), "{address} should be accepted");
        }

        for address in ["localhost", ":8080", "localhost:http", "local host:80", "::1:8080"] {
            let mut config = ServiceConfig::default();
            config.listener.bind_address = address.into();
            assert_eq!(
                validate_config(&config).unwrap_err(),
                vec![ValidationError::BindAddress(address.into())],
                "{address} should be rejected"
            );
        }
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "localhost".into();
        config.upstream.model = "  ".into();
        config.timeouts.request_secs = 0;
        config.limits.max_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::EmptyModel,
                ValidationError::ZeroTimeout,
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn test_temperature_bounds() {
        let mut config = ServiceConfig::default();
        config.upstream.temperature = 2.0;
        assert!(validate_config(&config).is_ok());

        config.upstream.temperature = -0.1;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::Temperature(-0.1)]
        );
    }
}

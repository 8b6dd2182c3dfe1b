//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Deliberately does NOT require the shared secret or validation
//!   endpoint to be present: their absence is a deferred per-request
//!   error, so a misconfigured process still starts and serves
//!   non-gated traffic

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("auth.validation_timeout_secs must be a positive number")]
    InvalidValidationTimeout,

    #[error("auth.validation_url '{0}' is not a valid URL")]
    InvalidValidationUrl(String),

    #[error("engine.timeout_secs must be greater than zero")]
    ZeroEngineTimeout,

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a resolved configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let timeout = config.auth.validation_timeout_secs;
    if !timeout.is_finite() || timeout <= 0.0 {
        errors.push(ValidationError::InvalidValidationTimeout);
    }

    if let Some(raw) = &config.auth.validation_url {
        if url::Url::parse(raw).is_err() {
            errors.push(ValidationError::InvalidValidationUrl(raw.clone()));
        }
    }

    if config.engine.timeout_secs == 0 {
        errors.push(ValidationError::ZeroEngineTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nonsense".into();
        config.timeouts.request_secs = 0;
        config.auth.validation_timeout_secs = -1.0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_bad_validation_url() {
        let mut config = GatewayConfig::default();
        config.auth.validation_url = Some("not a url".into());

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidValidationUrl(_)));
    }

    #[test]
    fn test_missing_secret_is_not_a_validation_error() {
        // Deferred configuration errors surface per request, not here.
        let config = GatewayConfig::default();
        assert!(config.auth.secret.is_none());
        assert!(validate_config(&config).is_ok());
    }
}

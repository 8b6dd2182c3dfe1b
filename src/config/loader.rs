//! Configuration loading from disk and environment.
//!
//! Precedence, lowest to highest: built-in defaults → TOML file → CLI
//! flags (applied by the caller) → environment variables. Everything
//! is resolved once at startup; nothing reads ambient state per
//! request.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::auth::classifier::ForwardedTrust;
use crate::config::schema::{AuthStrategy, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Validate a fully resolved configuration.
pub fn finalize(config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides on top of the file/CLI configuration.
/// Unknown values are logged and ignored rather than aborting startup.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Some(value) = env_var("OCR_LISTEN_ADDRESS") {
        match parse_listen_address(&value) {
            Some(addr) => config.listener.bind_address = addr,
            None => tracing::warn!(value = %value, "ignoring unparseable OCR_LISTEN_ADDRESS"),
        }
    }

    if let Some(value) = env_var("AUTH_LOCAL_ENABLED") {
        config.auth.require_local = parse_bool_flag(&value);
    }
    if let Some(value) = env_var("AUTH_REMOTE_ENABLED") {
        config.auth.require_remote = parse_bool_flag(&value);
    }

    if let Some(value) = env_var("AUTH_STRATEGY") {
        match value.to_ascii_lowercase().as_str() {
            "signature" => config.auth.strategy = AuthStrategy::Signature,
            "delegation" => config.auth.strategy = AuthStrategy::Delegation,
            _ => tracing::warn!(value = %value, "ignoring unknown AUTH_STRATEGY"),
        }
    }

    if let Some(value) = env_var("AUTH_FORWARDED_TRUST") {
        match value.to_ascii_lowercase().as_str() {
            "always" => config.auth.forwarded_trust = Some(ForwardedTrust::Always),
            "when-peer-local" => {
                config.auth.forwarded_trust = Some(ForwardedTrust::WhenPeerLocal)
            }
            _ => tracing::warn!(value = %value, "ignoring unknown AUTH_FORWARDED_TRUST"),
        }
    }

    if let Some(value) = env_var("OCR_SHARED_SECRET") {
        config.auth.secret = Some(value);
    }
    if let Some(value) = env_var("OCR_SHARED_SECRET_FILE") {
        config.auth.secret_file = Some(PathBuf::from(value));
    }

    if let Some(value) = env_var("AUTH_VALIDATION_URL") {
        config.auth.validation_url = Some(value);
    }
    if let Some(value) = env_var("AUTH_VALIDATION_TIMEOUT") {
        match value.parse::<f64>() {
            Ok(secs) => config.auth.validation_timeout_secs = secs,
            Err(_) => tracing::warn!(value = %value, "ignoring unparseable AUTH_VALIDATION_TIMEOUT"),
        }
    }

    if let Some(value) = env_var("DET_ENABLED") {
        config.engine.det_enabled = parse_bool_flag(&value);
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// The string `true` (case-insensitive) enables; anything else
/// disables.
pub fn parse_bool_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Accepts `host:port` verbatim or a bare port, which binds on all
/// interfaces.
pub fn parse_listen_address(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.contains(':') {
        return Some(value.to_string());
    }
    value.parse::<u16>().ok().map(|port| format!("0.0.0.0:{port}"))
}

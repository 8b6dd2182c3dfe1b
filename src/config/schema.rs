//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML config
//! files; every section has defaults so an empty file (or no file) is
//! a valid configuration. Environment overrides are applied once at
//! startup by the loader; the resulting value object is immutable for
//! the life of the process.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::auth::classifier::ForwardedTrust;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Authentication gate configuration.
    pub auth: AuthConfig,

    /// OCR engine adapter configuration.
    pub engine: EngineConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Which verifier strategy this process instance runs. The two are
/// mutually exclusive deployment modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthStrategy {
    /// In-process HMAC-SHA256 check against a shared secret.
    Signature,
    /// Delegation to an external validation endpoint.
    Delegation,
}

/// Authentication gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Require credentials from local (loopback/private) callers.
    pub require_local: bool,

    /// Require credentials from remote callers.
    pub require_remote: bool,

    /// Verifier strategy for this deployment.
    pub strategy: AuthStrategy,

    /// Forwarded-header trust variant. When unset, the strategy's
    /// historical pairing applies: signature deployments trust the
    /// header unconditionally, delegation deployments only when the
    /// peer itself is local.
    pub forwarded_trust: Option<ForwardedTrust>,

    /// Inline shared secret (Strategy A). The file source takes
    /// precedence when both are set.
    pub secret: Option<String>,

    /// Path to a file holding the shared secret (Strategy A).
    pub secret_file: Option<PathBuf>,

    /// Validation endpoint URL (Strategy B).
    pub validation_url: Option<String>,

    /// Outbound validation timeout in seconds (Strategy B).
    pub validation_timeout_secs: f64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_local: false,
            require_remote: true,
            strategy: AuthStrategy::Signature,
            forwarded_trust: None,
            secret: None,
            secret_file: None,
            validation_url: None,
            validation_timeout_secs: 20.0,
        }
    }
}

impl AuthConfig {
    /// The trust variant in effect for this deployment.
    pub fn resolved_forwarded_trust(&self) -> ForwardedTrust {
        self.forwarded_trust.unwrap_or(match self.strategy {
            AuthStrategy::Signature => ForwardedTrust::Always,
            AuthStrategy::Delegation => ForwardedTrust::WhenPeerLocal,
        })
    }
}

/// OCR engine adapter configuration. The engine itself is an external
/// black box reached through a per-request subprocess.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine command. Empty means no engine is configured and
    /// initialization will fail (the server still starts).
    pub command: String,

    /// Extra arguments passed to the engine command.
    pub args: Vec<String>,

    /// Per-recognition subprocess timeout in seconds.
    pub timeout_secs: u64,

    /// Request the detection capability during auto-initialization.
    pub det_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            timeout_secs: 30,
            det_enabled: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

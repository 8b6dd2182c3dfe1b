//! Remote token verification.
//!
//! # Responsibilities
//! - Forward the presented credential to the configured validation
//!   endpoint and relay its accept/reject decision
//!
//! # Design Decisions
//! - One `reqwest` client built at startup: bounded connection pool,
//!   TLS certificate verification on (no insecure bypass)
//! - The call is an awaited future inside the request pipeline, so
//!   dropping the inbound request cancels the outbound call
//! - A non-200 answer is a rejection carrying the upstream status and
//!   body verbatim; a transport failure means the token's validity is
//!   unknown and surfaces as service-unavailable, never as a client
//!   auth failure

use std::time::Duration;

use crate::auth::error::AuthError;
use crate::config::schema::AuthConfig;

/// Strategy B verifier: delegation to an external validation service.
pub struct DelegationVerifier {
    endpoint: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl DelegationVerifier {
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.validation_url.is_none() {
            tracing::warn!("no validation endpoint configured; gated requests will be rejected");
        }

        Self {
            endpoint: config.validation_url.clone(),
            timeout: Duration::from_secs_f64(config.validation_timeout_secs),
            client: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    fn with_endpoint(endpoint: Option<&str>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.map(str::to_string),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub async fn verify(&self, token: &str) -> Result<(), AuthError> {
        let endpoint = self.endpoint.as_deref().ok_or(AuthError::ServerMisconfigured(
            "authentication is required but no validation endpoint is configured.",
        ))?;

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AuthError::UpstreamUnreachable {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "validation endpoint rejected token");
        Err(AuthError::TokenRejected {
            status: status.as_u16(),
            body,
        })
    }
}

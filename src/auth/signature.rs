//! In-process token verification against a shared secret.
//!
//! # Responsibilities
//! - Resolve the shared secret once at startup (file source takes
//!   precedence over the inline value)
//! - Verify HMAC-SHA256 signed tokens and re-check the expiry claim
//!   against wall-clock time
//!
//! # Design Decisions
//! - A missing or unreadable secret is not a startup failure: the
//!   process keeps serving non-gated traffic and reports the
//!   configuration error only when a gated request arrives
//! - The expiry claim is re-checked after decode even though the
//!   library already enforces it; a token without `exp` counts as
//!   expired

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::auth::error::AuthError;
use crate::config::schema::AuthConfig;

/// Claims carried by a signed token. Only the timestamps are
/// inspected; no subject or audience fields are validated.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: u64,
    #[serde(default)]
    iat: u64,
}

/// Strategy A verifier: local signature check, no network.
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    /// Resolve the shared secret from configuration. Never fails:
    /// read errors are logged and leave the secret absent.
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = match &config.secret_file {
            Some(path) => read_secret_file(path),
            None => {
                if config.secret.is_some() {
                    tracing::info!("shared secret loaded from configuration");
                }
                config.secret.clone()
            }
        };

        if secret.is_none() {
            tracing::warn!("no shared secret configured; gated requests will be rejected");
        }

        Self { secret }
    }

    #[cfg(test)]
    fn with_secret(secret: Option<&str>) -> Self {
        Self {
            secret: secret.map(str::to_string),
        }
    }

    pub fn verify(&self, token: &str) -> Result<(), AuthError> {
        let secret = self.secret.as_deref().ok_or(AuthError::ServerMisconfigured(
            "authentication is required but no shared secret is configured.",
        ))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // `exp` presence is checked below so that an absent claim is
        // reported as expiry, not as a malformed token.
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid {
                detail: e.to_string(),
            },
        })?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if data.claims.exp <= now {
            return Err(AuthError::TokenExpired);
        }

        tracing::debug!(iat = data.claims.iat, exp = data.claims.exp, "token verified");
        Ok(())
    }
}

fn read_secret_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::info!(path = %path.display(), "shared secret loaded from file");
            Some(contents.trim().to_string())
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "could not read secret file");
            None
        }
    }
}

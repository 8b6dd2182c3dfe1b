//! Request gating pipeline.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → preflight exemption (OPTIONS, signature deployments only)
//!     → classifier.rs (peer + forwarded header → Local/Remote)
//!     → policy.rs (does this classification require auth?)
//!     → bearer.rs (extract `Bearer <token>`)
//!     → signature.rs | delegation.rs (per configured strategy)
//!     → downstream handler (original request, unmodified)
//! ```
//!
//! Proceed and reject are terminal: the first failure produces the
//! response and the protected handler never observes the request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::bearer::extract_bearer;
use crate::auth::classifier::{classify, ForwardedTrust};
use crate::auth::delegation::DelegationVerifier;
use crate::auth::policy::{requires_auth, AuthPolicy};
use crate::auth::signature::SignatureVerifier;
use crate::config::schema::{AuthConfig, AuthStrategy};
use crate::observability::metrics;

/// The configured verification strategy. A process instance runs
/// exactly one.
pub enum Verifier {
    Signature(SignatureVerifier),
    Delegation(DelegationVerifier),
}

impl Verifier {
    pub async fn verify(&self, token: &str) -> Result<(), crate::auth::error::AuthError> {
        match self {
            Verifier::Signature(v) => v.verify(token),
            Verifier::Delegation(v) => v.verify(token).await,
        }
    }

    /// Browser preflight probes carry no credentials; signature
    /// deployments serve them without entering the pipeline.
    fn exempts_preflight(&self) -> bool {
        matches!(self, Verifier::Signature(_))
    }
}

/// Immutable gate configuration, built once at startup and shared by
/// every request.
#[derive(Clone)]
pub struct AuthState {
    pub policy: AuthPolicy,
    pub trust: ForwardedTrust,
    pub verifier: Arc<Verifier>,
}

impl AuthState {
    pub fn from_config(config: &AuthConfig) -> Self {
        let verifier = match config.strategy {
            AuthStrategy::Signature => Verifier::Signature(SignatureVerifier::from_config(config)),
            AuthStrategy::Delegation => {
                Verifier::Delegation(DelegationVerifier::from_config(config))
            }
        };

        Self {
            policy: AuthPolicy {
                require_local: config.require_local,
                require_remote: config.require_remote,
            },
            trust: config.resolved_forwarded_trust(),
            verifier: Arc::new(verifier),
        }
    }
}

/// Middleware entry point; installed on the whole router.
pub async fn gate(
    State(state): State<AuthState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS && state.verifier.exempts_preflight() {
        metrics::record_gate_decision("preflight");
        return next.run(request).await;
    }

    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());
    let classification = classify(&peer.ip().to_string(), forwarded, state.trust);

    if !requires_auth(classification, &state.policy) {
        metrics::record_gate_decision("not_required");
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = match extract_bearer(auth_header) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(classification = ?classification, error = %e, "credential extraction failed");
            metrics::record_gate_decision("rejected");
            return e.into_response();
        }
    };

    match state.verifier.verify(token).await {
        Ok(()) => {
            metrics::record_gate_decision("allowed");
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(classification = ?classification, error = %e, "token verification failed");
            metrics::record_gate_decision("rejected");
            e.into_response()
        }
    }
}

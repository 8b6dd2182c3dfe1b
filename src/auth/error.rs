//! Authentication failure taxonomy.
//!
//! # Design Decisions
//! - Every failure is converted to a terminal HTTP response at the
//!   pipeline boundary; nothing propagates past the middleware
//! - `ServerMisconfigured` and `UpstreamUnreachable` are operator-facing
//!   (5xx); the rest are caller-facing (4xx)
//! - Detail strings may carry upstream bodies or library error text,
//!   never the shared secret

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is missing.")]
    MissingCredential,

    #[error("Invalid Authorization header format. Expected 'Bearer <token>'.")]
    MalformedCredential,

    #[error("Token has expired.")]
    TokenExpired,

    #[error("Invalid token.")]
    TokenInvalid { detail: String },

    /// The validation endpoint answered with a non-200 status. Its
    /// status and body are relayed verbatim so callers see the
    /// upstream reason.
    #[error("Token validation failed.")]
    TokenRejected { status: u16, body: String },

    /// The validation endpoint could not be reached; the token's
    /// validity is unknown, not disproven.
    #[error("Failed to connect to authentication service.")]
    UpstreamUnreachable { detail: String },

    #[error("Server configuration error: {0}")]
    ServerMisconfigured(&'static str),
}

/// JSON body shape shared by all reject responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, detail) = match self {
            AuthError::MissingCredential
            | AuthError::MalformedCredential
            | AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, None),
            AuthError::TokenInvalid { detail } => (StatusCode::FORBIDDEN, Some(detail)),
            AuthError::TokenRejected { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                Some(body),
            ),
            AuthError::UpstreamUnreachable { detail } => {
                (StatusCode::SERVICE_UNAVAILABLE, Some(detail))
            }
            AuthError::ServerMisconfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = ErrorBody {
            error: message,
            detail,
        };

        (status, Json(body)).into_response()
    }
}

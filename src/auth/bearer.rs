//! Authorization header parsing.
//!
//! Enforces the `Bearer <token>` scheme: exactly two whitespace
//! separated tokens, scheme compared case-insensitively. The token is
//! treated as an opaque non-empty string.

use crate::auth::error::AuthError;

/// Extract the bearer token from a raw `Authorization` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

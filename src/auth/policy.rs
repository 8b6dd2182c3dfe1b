//! Authentication requirement policy.
//!
//! Two independent switches decide whether a classified request must
//! present credentials. Evaluated fresh per request from configuration
//! that is immutable after startup.

use serde::{Deserialize, Serialize};

use crate::auth::classifier::Classification;

/// Per-classification authentication switches.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthPolicy {
    /// Require credentials from local (loopback/private) callers.
    pub require_local: bool,

    /// Require credentials from remote callers.
    pub require_remote: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            require_local: false,
            require_remote: true,
        }
    }
}

/// Whether a request with the given classification must authenticate.
pub fn requires_auth(classification: Classification, policy: &AuthPolicy) -> bool {
    match classification {
        Classification::Local => policy.require_local,
        Classification::Remote => policy.require_remote,
    }
}

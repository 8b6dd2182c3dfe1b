//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → middleware.rs (pipeline wiring, terminal responses)
//!     → classifier.rs (Local/Remote from peer + X-Forwarded-For)
//!     → policy.rs (require_local / require_remote switches)
//!     → bearer.rs (Authorization header parsing)
//!     → signature.rs (Strategy A: in-process HMAC-SHA256 check)
//!       or delegation.rs (Strategy B: remote validation service)
//! ```
//!
//! # Design Decisions
//! - Fail closed: malformed addresses classify as Remote, malformed
//!   credentials reject
//! - No cross-request mutable state; configuration is immutable after
//!   startup and safe for unsynchronized concurrent reads
//! - Missing secret/endpoint is detected at first gated use, not at
//!   startup, so a misconfigured process still serves non-gated traffic

pub mod bearer;
pub mod classifier;
pub mod delegation;
pub mod error;
pub mod middleware;
pub mod policy;
pub mod signature;

pub use classifier::{classify, Classification, ForwardedTrust};
pub use error::AuthError;
pub use middleware::{gate, AuthState};
pub use policy::{requires_auth, AuthPolicy};

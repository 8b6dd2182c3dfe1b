//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI flags (caller merges)
//!     → loader.rs env overrides (AUTH_*, OCR_*, DET_ENABLED)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed by value into server/auth constructors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload mechanism
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AuthConfig;
pub use schema::AuthStrategy;
pub use schema::EngineConfig;
pub use schema::GatewayConfig;

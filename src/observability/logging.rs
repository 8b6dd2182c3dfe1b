//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Derive the default filter from the configured level
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` always wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Call once, before anything logs.
pub fn init(level: &str) {
    let default_directive = format!("ocr_gateway={level},tower_http={level}");

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&default_directive)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! OCR engine subsystem.
//!
//! # Data Flow
//! ```text
//! POST /initialize
//!     → manager.rs (build adapter from config, swap the engine slot)
//!
//! POST /ocr
//!     → manager.rs (lock-free read of the active engine)
//!     → command.rs (hand image bytes to the external engine process)
//!     → recognized text
//! ```
//!
//! # Design Decisions
//! - The engine is an external black box: this crate never touches
//!   models or pixels, it only moves bytes in and text out
//! - A trait seam so tests can substitute an in-process fake
//! - Engine failures are request-scoped; the slot stays installed

use async_trait::async_trait;
use thiserror::Error;

pub mod command;
pub mod manager;

pub use command::CommandEngine;
pub use manager::{EngineManager, InitializeOptions};

/// Capability of turning image bytes into recognized text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, EngineError>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no OCR engine command is configured")]
    NotConfigured,

    #[error("OCR engine is not initialized")]
    NotInitialized,

    #[error("failed to start OCR engine: {0}")]
    Spawn(std::io::Error),

    #[error("OCR engine I/O error: {0}")]
    Io(std::io::Error),

    #[error("OCR engine timed out after {0} seconds")]
    Timeout(u64),

    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: i32, stderr: String },
}

//! Engine lifecycle management.
//!
//! The engine slot starts empty and is filled by `/initialize` (or the
//! startup auto-initialization). Writes swap the whole slot atomically;
//! per-request reads are lock-free.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Deserialize;

use crate::config::schema::EngineConfig;
use crate::engine::{CommandEngine, EngineError, OcrEngine};

/// Capabilities requested at initialization time.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct InitializeOptions {
    pub ocr: bool,
    pub det: bool,
}

impl Default for InitializeOptions {
    fn default() -> Self {
        Self {
            ocr: true,
            det: false,
        }
    }
}

struct ActiveEngine {
    recognizer: Option<Arc<dyn OcrEngine>>,
    models: Vec<String>,
}

pub struct EngineManager {
    config: EngineConfig,
    active: ArcSwapOption<ActiveEngine>,
}

impl EngineManager {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            active: ArcSwapOption::empty(),
        }
    }

    /// Install the engine adapter for the requested capabilities.
    /// Re-initialization replaces the previous slot; in-flight requests
    /// keep the engine they already resolved.
    pub fn initialize(&self, options: InitializeOptions) -> Result<Vec<String>, EngineError> {
        if self.config.command.is_empty() {
            return Err(EngineError::NotConfigured);
        }

        let mut models = Vec::new();
        let recognizer: Option<Arc<dyn OcrEngine>> = if options.ocr {
            models.push("ocr".to_string());
            Some(Arc::new(CommandEngine::from_config(&self.config, options.det)))
        } else {
            None
        };
        if options.det {
            models.push("det".to_string());
        }

        tracing::info!(models = ?models, command = %self.config.command, "engine initialized");
        self.active.store(Some(Arc::new(ActiveEngine {
            recognizer,
            models: models.clone(),
        })));
        Ok(models)
    }

    /// Swap in an arbitrary engine. Test seam.
    pub fn install(&self, engine: Arc<dyn OcrEngine>, models: Vec<String>) {
        self.active.store(Some(Arc::new(ActiveEngine {
            recognizer: Some(engine),
            models,
        })));
    }

    /// The active recognizer, if the `ocr` capability is loaded.
    pub fn recognizer(&self) -> Option<Arc<dyn OcrEngine>> {
        self.active.load_full().and_then(|active| active.recognizer.clone())
    }

    pub fn loaded_models(&self) -> Vec<String> {
        self.active
            .load_full()
            .map(|active| active.models.clone())
            .unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        self.recognizer().is_some()
    }
}

//! External engine process adapter.
//!
//! Runs the configured engine command once per recognition: image
//! bytes on stdin, recognized text on stdout. The child is killed if
//! the caller goes away or the timeout expires.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::schema::EngineConfig;
use crate::engine::{EngineError, OcrEngine};

pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandEngine {
    pub fn from_config(config: &EngineConfig, det: bool) -> Self {
        let mut args = config.args.clone();
        if det {
            args.push("--det".to_string());
        }
        Self {
            program: config.command.clone(),
            args,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl OcrEngine for CommandEngine {
    async fn recognize(&self, image: &[u8]) -> Result<String, EngineError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(EngineError::Spawn)?;

        // stdin must close before the engine can finish reading.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image).await.map_err(EngineError::Io)?;
            stdin.shutdown().await.map_err(EngineError::Io)?;
        }

        let timeout = std::time::Duration::from_secs(self.timeout_secs);
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| EngineError::Timeout(self.timeout_secs))?
            .map_err(EngineError::Io)?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

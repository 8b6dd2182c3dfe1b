//! Protected API handlers.
//!
//! # Responsibilities
//! - `/ocr`: decode the submitted image and hand it to the engine
//! - `/initialize`: install the engine adapter for the requested
//!   capabilities
//! - `/health`: liveness plus engine readiness
//!
//! Authentication has already happened by the time these run; a
//! rejected request never reaches them.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, InitializeOptions};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    /// Base64-encoded image bytes.
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub data: OcrData,
}

#[derive(Debug, Serialize)]
pub struct OcrData {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub message: String,
    pub loaded_models: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub engine_ready: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

fn json_error(status: StatusCode, error: &str, detail: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            detail,
        }),
    )
        .into_response()
}

pub async fn recognize(State(state): State<AppState>, Json(request): Json<OcrRequest>) -> Response {
    let image = match BASE64.decode(request.image.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "Image must be a valid base64 string.",
                None,
            )
        }
    };

    let Some(engine) = state.engines.recognizer() else {
        return json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "OCR engine is not initialized.",
            None,
        );
    };

    match engine.recognize(&image).await {
        Ok(text) => Json(OcrResponse {
            data: OcrData { text },
        })
        .into_response(),
        Err(e @ EngineError::Timeout(_)) => {
            tracing::error!(error = %e, "recognition timed out");
            json_error(
                StatusCode::GATEWAY_TIMEOUT,
                "OCR processing timed out.",
                Some(e.to_string()),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "recognition failed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "OCR processing failed.",
                Some(e.to_string()),
            )
        }
    }
}

pub async fn initialize(
    State(state): State<AppState>,
    Json(options): Json<InitializeOptions>,
) -> Response {
    match state.engines.initialize(options) {
        Ok(loaded_models) => Json(InitializeResponse {
            message: "Initialization successful.".to_string(),
            loaded_models,
        })
        .into_response(),
        Err(EngineError::NotConfigured) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error: no OCR engine command is configured.",
            None,
        ),
        Err(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Initialization failed.",
            Some(e.to_string()),
        ),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        engine_ready: state.engines.is_ready(),
    })
}

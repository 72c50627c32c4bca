//! Response types and error mapping for the HTTP surface
//!
//! Every response carries a `success` flag. A failed transcript result is a
//! 400 with the result body itself; typed errors are mapped to 400 or 500
//! with a `{success:false, error}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};

use crate::errors::AppError;
use crate::models::TranscriptResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "YouTube transcript proxy is running".to_string(),
        }
    }
}

fn status_for(result: &TranscriptResult) -> StatusCode {
    if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Serve a transcript result: 200 when successful, 400 with the same body
/// shape when not.
pub fn transcript_response(result: TranscriptResult) -> Response {
    let status = status_for(&result);
    (status, Json(result)).into_response()
}

/// Like [`transcript_response`] but with the resolved URL and video id
/// injected into the body, for the URL-based route family.
pub fn transcript_response_with_context(
    result: TranscriptResult,
    original_url: &str,
    video_id: &str,
) -> Response {
    let status = status_for(&result);
    let mut payload = serde_json::to_value(&result)
        .unwrap_or_else(|e| error_body(format!("Failed to serialize result: {e}")));

    if let Value::Object(map) = &mut payload {
        map.insert(
            "original_url".to_string(),
            Value::String(original_url.to_string()),
        );
        map.insert("video_id".to_string(), Value::String(video_id.to_string()));
    }

    (status, Json(payload)).into_response()
}

pub fn error_body(message: impl Into<String>) -> Value {
    json!({ "success": false, "error": message.into() })
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(error_body(message))).into_response()
}

/// Map a typed error to its HTTP shape. Caller mistakes and exhausted
/// acquisition are client errors; everything else is a 500.
pub fn handle_error(error: AppError) -> Response {
    let status = match &error {
        AppError::InvalidInput { .. }
        | AppError::Collaborator { .. }
        | AppError::AllStrategiesExhausted { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(error_body(error.to_string()))).into_response()
}

//! Health check HTTP handler

use axum::Json;
use axum::response::IntoResponse;

use crate::web::responses::HealthResponse;

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

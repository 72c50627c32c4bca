//! Chapters enrichment HTTP handler

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::web::AppState;
use crate::web::responses::handle_error;

/// Fetch the collaborator's chapter listing with transcripts attached
pub async fn chapters_with_transcripts(State(state): State<AppState>) -> Response {
    match state.chapters.chapters_with_transcripts().await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => handle_error(e),
    }
}

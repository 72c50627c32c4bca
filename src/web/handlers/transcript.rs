//! Transcript HTTP handlers
//!
//! Thin controllers over the fallback orchestrator. Language preference comes
//! from repeated `lang` query parameters or the request body; when absent the
//! configured default preference applies. URL-based routes resolve the video
//! id first and echo `original_url` and `video_id` back in the response.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Query;
use serde::Deserialize;
use serde_json::json;

use crate::utils::url::{decode_encoded_url, encode_url, extract_video_id};
use crate::web::AppState;
use crate::web::responses::{
    bad_request, handle_error, transcript_response, transcript_response_with_context,
};

#[derive(Debug, Deserialize)]
pub struct LanguageParams {
    #[serde(default)]
    pub lang: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DirectParams {
    pub url: Option<String>,
    #[serde(default)]
    pub lang: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: Option<String>,
    pub languages: Option<Vec<String>>,
}

fn effective_languages(requested: Vec<String>, defaults: &[String]) -> Vec<String> {
    if requested.is_empty() {
        defaults.to_vec()
    } else {
        requested
    }
}

/// `GET /api/transcript/{video_id}`
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(params): Query<LanguageParams>,
) -> Response {
    let languages = effective_languages(params.lang, &state.default_languages);

    match state.orchestrator.acquire(&video_id, &languages).await {
        Ok(result) => transcript_response(result),
        Err(e) => handle_error(e),
    }
}

/// `POST /api/transcript/url`
pub async fn transcript_from_url(
    State(state): State<AppState>,
    Json(body): Json<UrlRequest>,
) -> Response {
    let Some(url) = body.url.filter(|url| !url.is_empty()) else {
        return bad_request("YouTube URL is required");
    };

    let Some(video_id) = extract_video_id(&url) else {
        return bad_request("Invalid YouTube URL");
    };

    let languages = body
        .languages
        .unwrap_or_else(|| state.default_languages.clone());

    match state.orchestrator.acquire(&video_id, &languages).await {
        Ok(result) => transcript_response(result),
        Err(e) => handle_error(e),
    }
}

/// `GET /api/transcript/url/{encoded_url}`
///
/// The path segment is base64-decoded, falling back to percent-decoding.
pub async fn transcript_from_encoded_url(
    State(state): State<AppState>,
    Path(encoded_url): Path<String>,
    Query(params): Query<LanguageParams>,
) -> Response {
    let url = match decode_encoded_url(&encoded_url) {
        Ok(url) => url,
        Err(e) => return handle_error(e),
    };

    resolve_url(&state, &url, params.lang).await
}

/// `GET /api/transcript/direct`
pub async fn transcript_direct(
    State(state): State<AppState>,
    Query(params): Query<DirectParams>,
) -> Response {
    let Some(url) = params.url.filter(|url| !url.is_empty()) else {
        return bad_request("YouTube URL is required");
    };

    resolve_url(&state, &url, params.lang).await
}

/// `POST /api/encode-url`
pub async fn encode_url_for_route(Json(body): Json<UrlRequest>) -> Response {
    let Some(url) = body.url.filter(|url| !url.is_empty()) else {
        return bad_request("YouTube URL is required");
    };

    let encoded = encode_url(&url);
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "original_url": url,
            "encoded_url": encoded,
            "usage_example": format!("/api/transcript/url/{encoded}"),
        })),
    )
        .into_response()
}

async fn resolve_url(state: &AppState, url: &str, requested: Vec<String>) -> Response {
    let Some(video_id) = extract_video_id(url) else {
        return bad_request("Invalid YouTube URL");
    };

    let languages = effective_languages(requested, &state.default_languages);

    match state.orchestrator.acquire(&video_id, &languages).await {
        Ok(result) => transcript_response_with_context(result, url, &video_id),
        Err(e) => handle_error(e),
    }
}

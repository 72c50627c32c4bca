//! Web layer
//!
//! HTTP interface over the transcript acquisition pipeline. Handlers are
//! thin; all business logic lives in the service layer. Responses always
//! carry a `success` flag and errors are mapped to status codes in one place.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::services::{ChapterEnrichmentService, FallbackOrchestrator};

pub mod handlers;
pub mod responses;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<FallbackOrchestrator>,
    pub chapters: Arc<ChapterEnrichmentService>,
    pub default_languages: Vec<String>,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState, host: &str, port: u16) -> Result<Self> {
        let app = create_router(state);
        let addr: SocketAddr = format!("{host}:{port}").parse()?;

        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        tracing::info!("Listening on http://{}", self.addr);
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}

/// Create the router with all routes and middleware
///
/// Public so integration tests can mount the router without binding a port.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/transcript/direct",
            get(handlers::transcript::transcript_direct),
        )
        .route(
            "/api/transcript/url",
            post(handlers::transcript::transcript_from_url),
        )
        .route(
            "/api/transcript/url/{encoded_url}",
            get(handlers::transcript::transcript_from_encoded_url),
        )
        .route(
            "/api/transcript/{video_id}",
            get(handlers::transcript::get_transcript),
        )
        .route(
            "/api/encode-url",
            post(handlers::transcript::encode_url_for_route),
        )
        .route(
            "/api/chapters/transcript",
            get(handlers::chapters::chapters_with_transcripts),
        )
        .layer(axum::middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn log_requests(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    debug!("{} {} -> {}", method, path, response.status());
    response
}

//! Chapters enrichment
//!
//! Pulls a chapter listing from a collaborator API and decorates each chapter
//! with the transcript of its video. The collaborator payload is treated as
//! opaque JSON apart from the `success` flag and the `data` array; unknown
//! fields pass through untouched.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::TranscriptResult;
use crate::services::fallback::FallbackOrchestrator;
use crate::utils::CamouflagedHttpClient;
use crate::utils::url::extract_video_id;

pub struct ChapterEnrichmentService {
    http: Arc<CamouflagedHttpClient>,
    orchestrator: Arc<FallbackOrchestrator>,
    endpoint: String,
    languages: Vec<String>,
}

impl ChapterEnrichmentService {
    pub fn new(
        http: Arc<CamouflagedHttpClient>,
        orchestrator: Arc<FallbackOrchestrator>,
        endpoint: String,
        languages: Vec<String>,
    ) -> Self {
        Self {
            http,
            orchestrator,
            endpoint,
            languages,
        }
    }

    /// Fetch the chapter listing and enrich every chapter in place
    pub async fn chapters_with_transcripts(&self) -> AppResult<Value> {
        let mut payload: Value = self
            .http
            .get_json(&self.endpoint)
            .await
            .map_err(|e| AppError::internal(format!("Failed to fetch chapters: {e}")))?;

        if !payload
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Err(AppError::collaborator("Failed to fetch chapters data"));
        }

        if let Some(chapters) = payload.get_mut("data").and_then(Value::as_array_mut) {
            debug!("Enriching {} chapters with transcripts", chapters.len());
            for chapter in chapters.iter_mut() {
                self.enrich_one(chapter).await;
            }
        }

        Ok(payload)
    }

    /// Attach transcript fields to a single chapter. Chapters without a
    /// usable video URL are annotated without contacting the provider.
    async fn enrich_one(&self, chapter: &mut Value) {
        let video_url = chapter
            .get("videoUrl")
            .and_then(Value::as_str)
            .map(str::to_string);

        let Some(video_url) = video_url else {
            annotate_failure(chapter, "No video URL provided");
            return;
        };

        let Some(video_id) = extract_video_id(&video_url) else {
            annotate_failure(chapter, "Invalid YouTube URL");
            return;
        };

        // A typed orchestrator error takes the same wire shape as a failed
        // fetch result: all info fields present, non-error ones null.
        let result = match self.orchestrator.acquire(&video_id, &self.languages).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Transcript acquisition failed for chapter video {}: {}", video_id, e);
                TranscriptResult::failure(e.to_string())
            }
        };

        chapter["transcript"] = result
            .transcript
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null);
        chapter["transcriptFetched"] = Value::Bool(result.success);
        chapter["transcriptInfo"] = json!({
            "language": result.language,
            "language_code": result.language_code,
            "is_generated": result.is_generated,
            "error": result.error,
        });
    }
}

fn annotate_failure(chapter: &mut Value, error: impl Into<String>) {
    chapter["transcript"] = Value::Null;
    chapter["transcriptFetched"] = Value::Bool(false);
    chapter["transcriptInfo"] = json!({ "error": error.into() });
}

//! InnerTube-backed transcript provider
//!
//! Thin client for YouTube's player API: fetch the watch page, scrape the
//! `INNERTUBE_API_KEY`, ask the player endpoint for the caption track list,
//! then pull each track's timed text in `json3` form. Bot walls, consent
//! pages and unplayable videos surface as typed provider errors; the
//! orchestration above decides what to do about them.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::debug;

use crate::errors::{AppError, ProviderError, ProviderResult};
use crate::models::TranscriptSegment;
use crate::provider::{CaptionTrack, TranscriptCatalog, TranscriptProvider};
use crate::utils::CamouflagedHttpClient;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?key=";

static API_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());

pub struct InnerTubeProvider {
    http: Arc<CamouflagedHttpClient>,
}

impl InnerTubeProvider {
    pub fn new(http: Arc<CamouflagedHttpClient>) -> Self {
        Self { http }
    }

    fn http_error(error: AppError) -> ProviderError {
        match error {
            AppError::Provider(provider_error) => provider_error,
            other => ProviderError::unavailable(other.to_string()),
        }
    }

    fn extract_api_key(html: &str, video_id: &str) -> ProviderResult<String> {
        if html.contains("g-recaptcha") {
            return Err(ProviderError::Blocked {
                video_id: video_id.to_string(),
            });
        }
        if html.contains(r#"action="https://consent.youtube.com/s""#) {
            return Err(ProviderError::unavailable(
                "Consent page encountered while fetching watch page",
            ));
        }

        API_KEY_PATTERN
            .captures(html)
            .and_then(|captures| captures.get(1))
            .map(|key| key.as_str().to_string())
            .ok_or_else(|| ProviderError::parse("INNERTUBE_API_KEY not found in watch page"))
    }

    fn check_playability(video_id: &str, player: &Value) -> ProviderResult<()> {
        let Some(playability) = player.get("playabilityStatus") else {
            return Ok(());
        };

        let status = playability
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("");
        if status == "OK" || status.is_empty() {
            return Ok(());
        }

        let reason = playability
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or("");

        if status == "LOGIN_REQUIRED" && reason.contains("not a bot") {
            return Err(ProviderError::Blocked {
                video_id: video_id.to_string(),
            });
        }

        Err(ProviderError::NoTranscripts {
            video_id: video_id.to_string(),
            reason: if reason.is_empty() {
                format!("video unplayable ({status})")
            } else {
                reason.to_string()
            },
        })
    }

    fn parse_caption_tracks(video_id: &str, player: &Value) -> ProviderResult<Vec<CaptionTrack>> {
        let Some(caption_tracks) = player
            .get("captions")
            .and_then(|captions| captions.get("playerCaptionsTracklistRenderer"))
            .and_then(|renderer| renderer.get("captionTracks"))
            .and_then(Value::as_array)
        else {
            return Err(ProviderError::NoTranscripts {
                video_id: video_id.to_string(),
                reason: "transcripts are disabled or unavailable".to_string(),
            });
        };

        let mut tracks = Vec::with_capacity(caption_tracks.len());
        for caption in caption_tracks {
            let Some(language_code) = caption.get("languageCode").and_then(Value::as_str) else {
                continue;
            };
            let Some(base_url) = caption.get("baseUrl").and_then(Value::as_str) else {
                continue;
            };

            let language = caption
                .get("name")
                .and_then(|name| {
                    name.get("simpleText").and_then(Value::as_str).or_else(|| {
                        name.get("runs")
                            .and_then(Value::as_array)
                            .and_then(|runs| runs.first())
                            .and_then(|run| run.get("text"))
                            .and_then(Value::as_str)
                    })
                })
                .unwrap_or(language_code);

            let is_generated = caption
                .get("kind")
                .and_then(Value::as_str)
                .map(|kind| kind == "asr")
                .unwrap_or(false);

            tracks.push(CaptionTrack {
                language: language.to_string(),
                language_code: language_code.to_string(),
                is_generated,
                base_url: base_url.replace("&fmt=srv3", ""),
            });
        }

        if tracks.is_empty() {
            return Err(ProviderError::NoTranscripts {
                video_id: video_id.to_string(),
                reason: "no usable caption tracks".to_string(),
            });
        }

        Ok(tracks)
    }

    fn parse_json3_events(payload: &str) -> ProviderResult<Vec<TranscriptSegment>> {
        let timed_text: Value = serde_json::from_str(payload)
            .map_err(|e| ProviderError::parse(format!("invalid json3 timed text: {e}")))?;

        let events = timed_text
            .get("events")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::parse("json3 timed text without events"))?;

        let mut segments = Vec::new();
        for event in events {
            let Some(segs) = event.get("segs").and_then(Value::as_array) else {
                continue;
            };

            let text: String = segs
                .iter()
                .filter_map(|seg| seg.get("utf8").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("");
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                continue;
            }

            let start_ms = event.get("tStartMs").and_then(Value::as_f64).unwrap_or(0.0);
            let duration_ms = event
                .get("dDurationMs")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);

            segments.push(TranscriptSegment {
                text,
                start: start_ms / 1000.0,
                duration: duration_ms / 1000.0,
            });
        }

        Ok(segments)
    }
}

#[async_trait]
impl TranscriptProvider for InnerTubeProvider {
    async fn list_transcripts(&self, video_id: &str) -> ProviderResult<TranscriptCatalog> {
        let watch_url = format!("{WATCH_URL}{video_id}");
        let html = self
            .http
            .get_text(&watch_url)
            .await
            .map_err(Self::http_error)?;

        let api_key = Self::extract_api_key(&html, video_id)?;
        debug!("Resolved InnerTube API key for video {}", video_id);

        let player_url = format!("{PLAYER_URL}{api_key}");
        let body = json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": "20.10.38"
                }
            },
            "videoId": video_id
        });

        let player: Value = self
            .http
            .post_json(&player_url, &body)
            .await
            .map_err(Self::http_error)?;

        Self::check_playability(video_id, &player)?;
        let tracks = Self::parse_caption_tracks(video_id, &player)?;
        debug!("Video {} exposes {} caption tracks", video_id, tracks.len());

        Ok(TranscriptCatalog {
            video_id: video_id.to_string(),
            tracks,
        })
    }

    async fn fetch_segments(&self, track: &CaptionTrack) -> ProviderResult<Vec<TranscriptSegment>> {
        let url = format!("{}&fmt=json3", track.base_url);
        let payload = self.http.get_text(&url).await.map_err(Self::http_error)?;
        Self::parse_json3_events(&payload)
    }

    async fn fetch_plain_text(
        &self,
        video_id: &str,
        language_code: &str,
    ) -> ProviderResult<String> {
        let catalog = self.list_transcripts(video_id).await?;
        let track =
            catalog
                .find_track(language_code)
                .ok_or_else(|| ProviderError::NoMatchingLanguage {
                    video_id: video_id.to_string(),
                    requested: vec![language_code.to_string()],
                })?;

        let url = format!("{}&fmt=json3", track.base_url);
        let payload = self.http.get_text(&url).await.map_err(Self::http_error)?;
        let timed_text: Value = serde_json::from_str(&payload)
            .map_err(|e| ProviderError::parse(format!("invalid json3 timed text: {e}")))?;

        // Formatting preserved: newline-joined lines, no per-segment cleanup.
        let lines: Vec<String> = timed_text
            .get("events")
            .and_then(Value::as_array)
            .map(|events| {
                events
                    .iter()
                    .filter_map(|event| event.get("segs").and_then(Value::as_array))
                    .map(|segs| {
                        segs.iter()
                            .filter_map(|seg| seg.get("utf8").and_then(Value::as_str))
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .filter(|line| !line.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if lines.is_empty() {
            return Err(ProviderError::parse("timed text contained no segments"));
        }

        Ok(lines.join("\n"))
    }
}

//! Transcript fetcher: language selection and result normalization
//!
//! Talks to the transcript provider, walks the preferred languages in order
//! (silently skipping languages with no match), falls back to English, and
//! flattens the timed-text segments into one space-joined transcript string.
//! Every failure below this boundary is converted into a `success=false`
//! result; the fetcher itself never returns an error.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{ProviderError, ProviderResult};
use crate::models::TranscriptResult;
use crate::provider::TranscriptProvider;

/// Always attempted when no preferred language matches
const FALLBACK_LANGUAGE: &str = "en";

pub struct TranscriptFetcher {
    provider: Arc<dyn TranscriptProvider>,
}

impl TranscriptFetcher {
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the best-matching transcript for a video
    pub async fn fetch(&self, video_id: &str, languages: &[String]) -> TranscriptResult {
        match self.try_fetch(video_id, languages).await {
            Ok(result) => result,
            Err(e) => {
                debug!("Transcript fetch failed for {}: {}", video_id, e);
                TranscriptResult::failure(e.to_string())
            }
        }
    }

    async fn try_fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> ProviderResult<TranscriptResult> {
        let catalog = self.provider.list_transcripts(video_id).await?;

        let track = languages
            .iter()
            .find_map(|language| catalog.find_track(language))
            .or_else(|| catalog.find_track(FALLBACK_LANGUAGE))
            .ok_or_else(|| ProviderError::NoMatchingLanguage {
                video_id: video_id.to_string(),
                requested: languages.to_vec(),
            })?;

        debug!(
            "Selected {} transcript ({}) for {}",
            track.language_code,
            if track.is_generated { "generated" } else { "manual" },
            video_id
        );

        let segments = self.provider.fetch_segments(track).await?;
        let transcript = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(TranscriptResult::complete(
            transcript,
            track.language.clone(),
            track.language_code.clone(),
            track.is_generated,
            segments,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderResult;
    use crate::models::TranscriptSegment;
    use crate::provider::{CaptionTrack, TranscriptCatalog};
    use async_trait::async_trait;

    struct FixedProvider {
        tracks: Vec<CaptionTrack>,
    }

    #[async_trait]
    impl TranscriptProvider for FixedProvider {
        async fn list_transcripts(&self, video_id: &str) -> ProviderResult<TranscriptCatalog> {
            if self.tracks.is_empty() {
                return Err(ProviderError::NoTranscripts {
                    video_id: video_id.to_string(),
                    reason: "none".to_string(),
                });
            }
            Ok(TranscriptCatalog {
                video_id: video_id.to_string(),
                tracks: self.tracks.clone(),
            })
        }

        async fn fetch_segments(
            &self,
            _track: &CaptionTrack,
        ) -> ProviderResult<Vec<TranscriptSegment>> {
            Ok(vec![
                TranscriptSegment {
                    text: "hello".to_string(),
                    start: 0.0,
                    duration: 1.0,
                },
                TranscriptSegment {
                    text: "world".to_string(),
                    start: 1.0,
                    duration: 1.0,
                },
            ])
        }

        async fn fetch_plain_text(
            &self,
            _video_id: &str,
            _language_code: &str,
        ) -> ProviderResult<String> {
            Ok("hello\nworld".to_string())
        }
    }

    fn english_generated() -> CaptionTrack {
        CaptionTrack {
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: true,
            base_url: "https://timedtext.example/en".to_string(),
        }
    }

    #[tokio::test]
    async fn falls_back_to_english_when_preferred_absent() {
        let fetcher = TranscriptFetcher::new(Arc::new(FixedProvider {
            tracks: vec![english_generated()],
        }));

        let result = fetcher
            .fetch("vid", &["id".to_string(), "en".to_string()])
            .await;

        assert!(result.success);
        assert_eq!(result.language_code.as_deref(), Some("en"));
        assert_eq!(result.is_generated, Some(true));
        assert_eq!(result.transcript.as_deref(), Some("hello world"));
    }

    #[tokio::test]
    async fn preferred_language_wins_over_fallback() {
        let indonesian = CaptionTrack {
            language: "Indonesian".to_string(),
            language_code: "id".to_string(),
            is_generated: false,
            base_url: "https://timedtext.example/id".to_string(),
        };
        let fetcher = TranscriptFetcher::new(Arc::new(FixedProvider {
            tracks: vec![english_generated(), indonesian],
        }));

        let result = fetcher
            .fetch("vid", &["id".to_string(), "en".to_string()])
            .await;

        assert_eq!(result.language_code.as_deref(), Some("id"));
        assert_eq!(result.is_generated, Some(false));
    }

    #[tokio::test]
    async fn provider_failure_becomes_failed_result() {
        let fetcher = TranscriptFetcher::new(Arc::new(FixedProvider { tracks: vec![] }));

        let result = fetcher.fetch("vid", &["en".to_string()]).await;

        assert!(!result.success);
        assert!(result.transcript.is_none());
        assert!(result.error.as_deref().unwrap().contains("vid"));
    }

    #[tokio::test]
    async fn no_language_at_all_fails() {
        let german_only = CaptionTrack {
            language: "German".to_string(),
            language_code: "de".to_string(),
            is_generated: false,
            base_url: "https://timedtext.example/de".to_string(),
        };
        let fetcher = TranscriptFetcher::new(Arc::new(FixedProvider {
            tracks: vec![german_only],
        }));

        let result = fetcher.fetch("vid", &["id".to_string()]).await;

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("No transcript"));
    }
}

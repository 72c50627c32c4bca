//! Transcript provider abstraction
//!
//! The acquisition pipeline never talks to YouTube directly; it delegates to
//! a [`TranscriptProvider`] implementation. The trait seam keeps the
//! orchestration testable with fakes and lets the backing client be swapped
//! without touching the fetcher or the fallback orchestrator.

pub mod innertube;

pub use innertube::InnerTubeProvider;

use async_trait::async_trait;

use crate::errors::ProviderResult;
use crate::models::TranscriptSegment;

/// One caption track advertised by the provider
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// Human-readable language name, e.g. "English"
    pub language: String,
    /// BCP-47 style code, e.g. "en"
    pub language_code: String,
    /// True for auto-generated (ASR) tracks
    pub is_generated: bool,
    /// Provider-specific timed-text location
    pub base_url: String,
}

/// All caption tracks available for one video
#[derive(Debug, Clone)]
pub struct TranscriptCatalog {
    pub video_id: String,
    pub tracks: Vec<CaptionTrack>,
}

impl TranscriptCatalog {
    /// Find a track for a language code; manually created tracks win over
    /// generated ones for the same language.
    pub fn find_track(&self, language_code: &str) -> Option<&CaptionTrack> {
        self.tracks
            .iter()
            .find(|track| !track.is_generated && track.language_code == language_code)
            .or_else(|| {
                self.tracks
                    .iter()
                    .find(|track| track.language_code == language_code)
            })
    }
}

/// External capability that can list caption tracks and fetch their timed text
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List available transcripts; fails if the video has none or does not exist
    async fn list_transcripts(&self, video_id: &str) -> ProviderResult<TranscriptCatalog>;

    /// Fetch a track's timed text as ordered segments
    async fn fetch_segments(&self, track: &CaptionTrack) -> ProviderResult<Vec<TranscriptSegment>>;

    /// Simplest entry point: plain transcript text with the provider's own
    /// formatting preserved. Used by the last-resort fallback strategy.
    async fn fetch_plain_text(&self, video_id: &str, language_code: &str)
    -> ProviderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            language: code.to_uppercase(),
            language_code: code.to_string(),
            is_generated: generated,
            base_url: format!("https://timedtext.example/{code}"),
        }
    }

    #[test]
    fn manual_track_wins_over_generated() {
        let catalog = TranscriptCatalog {
            video_id: "abc".to_string(),
            tracks: vec![track("en", true), track("en", false)],
        };

        let found = catalog.find_track("en").unwrap();
        assert!(!found.is_generated);
    }

    #[test]
    fn generated_track_used_when_only_option() {
        let catalog = TranscriptCatalog {
            video_id: "abc".to_string(),
            tracks: vec![track("en", true)],
        };

        assert!(catalog.find_track("en").unwrap().is_generated);
        assert!(catalog.find_track("id").is_none());
    }
}

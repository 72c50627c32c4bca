//! Data models shared across the transcript acquisition pipeline
//!
//! The wire shapes match the original service contract: a flat result object
//! with a `success` flag, the concatenated transcript, language metadata and
//! the raw timed-text segments under `raw_data`.

use serde::{Deserialize, Serialize};

/// One timed-text segment as returned by the transcript provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Segment duration, in seconds
    pub duration: f64,
}

/// Outcome of a transcript acquisition attempt
///
/// Invariant: `success == true` implies `transcript` and `raw_segments` are
/// present and `error` is absent; `success == false` implies `transcript` is
/// absent and `error` is present. Use [`TranscriptResult::complete`] and
/// [`TranscriptResult::failure`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub success: bool,
    /// Concatenated transcript text; serialized as an explicit null on failure
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generated: Option<bool>,
    /// Ordered timed-text segments; `raw_data` on the wire
    #[serde(
        rename = "raw_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_segments: Option<Vec<TranscriptSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptResult {
    /// A successful acquisition
    pub fn complete(
        transcript: String,
        language: String,
        language_code: String,
        is_generated: bool,
        raw_segments: Vec<TranscriptSegment>,
    ) -> Self {
        Self {
            success: true,
            transcript: Some(transcript),
            language: Some(language),
            language_code: Some(language_code),
            is_generated: Some(is_generated),
            raw_segments: Some(raw_segments),
            error: None,
        }
    }

    /// A failed acquisition with a descriptive error
    pub fn failure<S: Into<String>>(error: S) -> Self {
        Self {
            success: false,
            transcript: None,
            language: None,
            language_code: None,
            is_generated: None,
            raw_segments: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_result_upholds_invariant() {
        let result = TranscriptResult::complete(
            "hello world".to_string(),
            "English".to_string(),
            "en".to_string(),
            true,
            vec![TranscriptSegment {
                text: "hello world".to_string(),
                start: 0.0,
                duration: 1.5,
            }],
        );

        assert!(result.success);
        assert!(result.transcript.is_some());
        assert!(result.raw_segments.is_some());
        assert!(result.error.is_none());
    }

    #[test]
    fn failure_result_upholds_invariant() {
        let result = TranscriptResult::failure("no transcripts");

        assert!(!result.success);
        assert!(result.transcript.is_none());
        assert_eq!(result.error.as_deref(), Some("no transcripts"));
    }

    #[test]
    fn segments_serialize_as_raw_data() {
        let result = TranscriptResult::complete(
            "hi".to_string(),
            "English".to_string(),
            "en".to_string(),
            false,
            vec![TranscriptSegment {
                text: "hi".to_string(),
                start: 0.25,
                duration: 0.5,
            }],
        );

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("raw_data").is_some());
        assert!(value.get("raw_segments").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_serializes_explicit_null_transcript() {
        let value = serde_json::to_value(TranscriptResult::failure("boom")).unwrap();
        assert!(value.get("transcript").unwrap().is_null());
        assert_eq!(value.get("error").unwrap(), "boom");
        assert!(value.get("language").is_none());
    }
}

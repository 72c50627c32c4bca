//! YouTube URL handling: video identifier extraction and the base64 URL
//! encoding used by the `/api/transcript/url/{encoded_url}` route family.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{AppError, AppResult};

/// Ordered URL-shape patterns; the first capturing match wins. The capture
/// group stops at the first of `&`, `?`, `#` or newline.
static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .unwrap(),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").unwrap(),
    ]
});

/// Extract a video identifier from a YouTube URL
///
/// A non-match is an expected outcome, not a failure: malformed or empty
/// input yields `None`, never an error.
pub fn extract_video_id(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }

    for pattern in VIDEO_ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(input)
            && let Some(id) = captures.get(1)
        {
            return Some(id.as_str().to_string());
        }
    }

    None
}

/// Base64-encode a URL for use as a path segment
///
/// Uses the URL-safe alphabet: the standard alphabet can emit `/`, which
/// would split the path segment the encoded URL travels in.
pub fn encode_url(url: &str) -> String {
    URL_SAFE.encode(url)
}

/// Decode an encoded URL path segment
///
/// Base64 is tried first (URL-safe, then standard for payloads encoded
/// elsewhere); if neither yields valid UTF-8 the payload is percent-decoded
/// instead. The original payload is echoed back in the error for
/// debuggability.
pub fn decode_encoded_url(encoded: &str) -> AppResult<String> {
    for engine in [&URL_SAFE, &STANDARD] {
        if let Ok(bytes) = engine.decode(encoded)
            && let Ok(url) = String::from_utf8(bytes)
        {
            return Ok(url);
        }
    }

    match urlencoding::decode(encoded) {
        Ok(url) => Ok(url.into_owned()),
        Err(e) => Err(AppError::invalid_input(format!(
            "Could not decode URL payload '{encoded}': {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn extracts_from_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn extracts_from_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn extracts_when_v_is_not_first_param() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn truncates_at_query_separators() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=xyz"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ#t=1m"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn mismatching_input_yields_none() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=abc"), None);
        assert_eq!(extract_video_id("not a url at all"), None);
    }

    #[test]
    fn base64_round_trip() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        let encoded = encode_url(url);
        assert_eq!(decode_encoded_url(&encoded).unwrap(), url);
    }

    #[test]
    fn encoded_url_survives_as_a_path_segment() {
        // The standard alphabet would emit '/' for this URL and break the
        // path segment it is carried in.
        let encoded = encode_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('+'));
    }

    #[test]
    fn standard_alphabet_payloads_still_decode() {
        // Standard-alphabet encoding of the watch URL; contains '/' so the
        // URL-safe engine rejects it.
        let decoded =
            decode_encoded_url("aHR0cHM6Ly93d3cueW91dHViZS5jb20vd2F0Y2g/dj1kUXc0dzlXZ1hjUQ==")
                .unwrap();
        assert_eq!(decoded, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn percent_encoded_fallback() {
        let decoded =
            decode_encoded_url("https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ").unwrap();
        assert_eq!(decoded, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}

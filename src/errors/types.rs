//! Error type definitions for the transcript proxy
//!
//! This module defines all error types used throughout the application,
//! providing a hierarchical error system that makes debugging and error
//! handling more straightforward.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the application.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or unparseable caller input (URLs, encoded payloads)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Transcript provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// External chapters collaborator errors
    #[error("Chapters collaborator error: {message}")]
    Collaborator { message: String },

    /// The fallback orchestrator ran out of strategies
    #[error("All {attempts} fallback strategies exhausted for video {video_id}")]
    AllStrategiesExhausted { video_id: String, attempts: usize },

    /// Cache store read/write failures
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Transcript provider specific errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider network or listing failures
    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },

    /// HTTP errors from the provider's upstream
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The upstream identified the request as automated traffic
    #[error("Request blocked by provider upstream for video {video_id}")]
    Blocked { video_id: String },

    /// The video has no transcripts or does not exist
    #[error("No transcripts available for video {video_id}: {reason}")]
    NoTranscripts { video_id: String, reason: String },

    /// Neither a preferred language nor the English fallback matched
    #[error("No transcript found for video {video_id} in languages {requested:?}")]
    NoMatchingLanguage {
        video_id: String,
        requested: Vec<String>,
    },

    /// Malformed provider response
    #[error("Malformed provider response: {message}")]
    Parse { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a collaborator error
    pub fn collaborator<S: Into<String>>(message: S) -> Self {
        Self::Collaborator {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl ProviderError {
    /// Create an unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

//! Centralized error handling for the transcript proxy
//!
//! This module unifies error types across all application layers. The
//! transcript fetcher and the fallback orchestrator convert everything that
//! happens below them into either a structured `TranscriptResult` or one of
//! these typed errors at their boundary; nothing propagates as an
//! unstructured crash.
//!
//! # Error Categories
//!
//! - **Provider Errors**: transcript provider connectivity, listing and
//!   timed-text parsing failures
//! - **Input Errors**: missing or unparseable URLs and encoded payloads
//! - **Collaborator Errors**: the external chapters endpoint is unreachable
//!   or reports failure
//! - **Exhaustion**: the fallback orchestrator ran out of strategies

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for provider-layer Results
pub type ProviderResult<T> = Result<T, ProviderError>;

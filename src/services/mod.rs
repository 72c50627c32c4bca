//! Service layer: the transcript acquisition pipeline
//!
//! Leaf to root: rate limiter, cache store, transcript fetcher, fallback
//! orchestrator, chapters enrichment.

pub mod cache;
pub mod chapters;
pub mod fallback;
pub mod fetcher;
pub mod rate_limiter;

pub use cache::{FileTranscriptCache, TranscriptCache};
pub use chapters::ChapterEnrichmentService;
pub use fallback::{FallbackOrchestrator, FallbackPolicy, FallbackStrategy};
pub use fetcher::TranscriptFetcher;
pub use rate_limiter::RateLimiter;

//! Fallback orchestrator: layered acquisition strategies
//!
//! Strategies are tried in a fixed order until one produces a successful
//! result. Between failed strategies the orchestrator sleeps
//! `2^i * uniform(1,3)` backoff-base units (i = zero-based strategy index).
//! Only the first strategy consults or writes the cache; only the first is
//! rate limited. If every strategy fails the caller gets a single
//! `AllStrategiesExhausted` error, never a partial result.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::TranscriptResult;
use crate::provider::TranscriptProvider;
use crate::services::cache::TranscriptCache;
use crate::services::fetcher::TranscriptFetcher;
use crate::services::rate_limiter::RateLimiter;

/// One self-contained acquisition method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStrategy {
    /// Cache lookup, then a rate-limited fetch whose outcome (success or
    /// failure) is written back to the cache
    CachedAndLimited,
    /// Unconditional pause, then an uncached, unlimited fetch
    SlowRetry,
    /// Uncached fetch restricted to English
    EnglishOnly,
    /// Provider's simplest entry point, hardcoded to English with formatting
    /// preserved. Ignores the caller's language preference; kept as-is
    /// pending product sign-off.
    RawProviderCall,
}

impl FallbackStrategy {
    /// The fixed evaluation order
    pub const ORDERED: [FallbackStrategy; 4] = [
        FallbackStrategy::CachedAndLimited,
        FallbackStrategy::SlowRetry,
        FallbackStrategy::EnglishOnly,
        FallbackStrategy::RawProviderCall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FallbackStrategy::CachedAndLimited => "cached_and_limited",
            FallbackStrategy::SlowRetry => "slow_retry",
            FallbackStrategy::EnglishOnly => "english_only",
            FallbackStrategy::RawProviderCall => "raw_provider_call",
        }
    }
}

/// Orchestrator timing knobs
#[derive(Debug, Clone)]
pub struct FallbackPolicy {
    pub slow_retry_delay: Duration,
    pub backoff_base: Duration,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            slow_retry_delay: Duration::from_secs(5),
            backoff_base: Duration::from_secs(1),
        }
    }
}

pub struct FallbackOrchestrator {
    fetcher: TranscriptFetcher,
    provider: Arc<dyn TranscriptProvider>,
    cache: Arc<dyn TranscriptCache>,
    limiter: Arc<RateLimiter>,
    policy: FallbackPolicy,
}

impl FallbackOrchestrator {
    pub fn new(
        fetcher: TranscriptFetcher,
        provider: Arc<dyn TranscriptProvider>,
        cache: Arc<dyn TranscriptCache>,
        limiter: Arc<RateLimiter>,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            fetcher,
            provider,
            cache,
            limiter,
            policy,
        }
    }

    /// Acquire a transcript, walking the strategy ladder until one succeeds
    pub async fn acquire(&self, video_id: &str, languages: &[String]) -> AppResult<TranscriptResult> {
        let strategies = FallbackStrategy::ORDERED;

        for (index, strategy) in strategies.iter().enumerate() {
            debug!("Strategy {} ({}) for video {}", index + 1, strategy.name(), video_id);

            match self.attempt(*strategy, video_id, languages).await {
                Ok(result) if result.success => {
                    info!(
                        "Acquired transcript for {} via strategy {} ({})",
                        video_id,
                        index + 1,
                        strategy.name()
                    );
                    return Ok(result);
                }
                Ok(result) => {
                    warn!(
                        "Strategy {} returned failure for {}: {}",
                        strategy.name(),
                        video_id,
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
                Err(e) => {
                    warn!("Strategy {} errored for {}: {}", strategy.name(), video_id, e);
                }
            }

            if index + 1 < strategies.len() {
                let backoff = self.backoff_delay(index);
                debug!("Backing off {:?} before next strategy", backoff);
                tokio::time::sleep(backoff).await;
            }
        }

        Err(AppError::AllStrategiesExhausted {
            video_id: video_id.to_string(),
            attempts: strategies.len(),
        })
    }

    /// Exponential backoff with jitter: `2^i * uniform(1,3)` base units
    fn backoff_delay(&self, index: usize) -> Duration {
        let multiplier = rand::rng().random_range(1.0..3.0) * f64::from(1u32 << index.min(16));
        self.policy.backoff_base.mul_f64(multiplier)
    }

    async fn attempt(
        &self,
        strategy: FallbackStrategy,
        video_id: &str,
        languages: &[String],
    ) -> AppResult<TranscriptResult> {
        match strategy {
            FallbackStrategy::CachedAndLimited => {
                if let Some(cached) = self.cache.read(video_id).await? {
                    debug!("Serving cached result for {}", video_id);
                    return Ok(cached);
                }

                let result = self
                    .limiter
                    .run(self.fetcher.fetch(video_id, languages))
                    .await;

                // Failed attempts are cached too; a fresh negative entry
                // keeps the rate-limited path from hammering a dead video.
                if let Err(e) = self.cache.write(video_id, &result).await {
                    warn!("Cache write failed for {}: {}", video_id, e);
                }

                Ok(result)
            }
            FallbackStrategy::SlowRetry => {
                tokio::time::sleep(self.policy.slow_retry_delay).await;
                Ok(self.fetcher.fetch(video_id, languages).await)
            }
            FallbackStrategy::EnglishOnly => {
                Ok(self.fetcher.fetch(video_id, &["en".to_string()]).await)
            }
            FallbackStrategy::RawProviderCall => {
                let text = self.provider.fetch_plain_text(video_id, "en").await?;
                Ok(TranscriptResult::complete(
                    text,
                    "English".to_string(),
                    "en".to_string(),
                    false,
                    Vec::new(),
                ))
            }
        }
    }
}

//! Process-wide rate limiter for the transcript provider path
//!
//! One limiter instance is shared by every caller; it enforces a minimum
//! spacing of `60/N` seconds between consecutive calls for an N-calls-per-
//! minute budget. The "last call" timestamp sits behind a mutex that is held
//! across the wrapped call, so concurrent requests are serialized rather than
//! racing past the interval check, and the timestamp is taken only after the
//! call completes: a long-running call pushes out the next permissible start
//! by its own duration.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

pub struct RateLimiter {
    min_interval: Duration,
    last_completed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Limiter for a calls-per-minute budget
    pub fn per_minute(calls: u32) -> Self {
        let calls = calls.max(1);
        Self::with_interval(Duration::from_secs_f64(60.0 / f64::from(calls)))
    }

    /// Limiter with an explicit minimum spacing
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_completed: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Run a call through the limiter, blocking until the interval since the
    /// previous call's completion has elapsed.
    pub async fn run<F, T>(&self, call: F) -> T
    where
        F: Future<Output = T>,
    {
        let mut last = self.last_completed.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Rate limit: waiting {:?} before next provider call", wait);
                tokio::time::sleep(wait).await;
            }
        }

        let result = call.await;
        *last = Some(Instant::now());
        result
    }
}

//! Transcript cache store
//!
//! Keyed by video id with a time-based staleness window. The trait keeps the
//! backing mechanism swappable; the shipped implementation is a file-per-key
//! JSON store whose modification time is the staleness clock. Expired or
//! unreadable entries are ignored, never deleted; the next write refreshes
//! them. Concurrent writers to the same key are not coordinated — results for
//! a fixed video id are expected to be stable, so last writer wins.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::TranscriptResult;

/// Key-value store with a staleness window, keyed by video id
#[async_trait]
pub trait TranscriptCache: Send + Sync {
    /// Returns the stored result, or `None` on absent or expired entries
    async fn read(&self, video_id: &str) -> AppResult<Option<TranscriptResult>>;

    /// Persist a result, overwriting any prior entry unconditionally
    async fn write(&self, video_id: &str, result: &TranscriptResult) -> AppResult<()>;
}

/// File-per-key JSON cache under a fixed directory, created on demand
pub struct FileTranscriptCache {
    directory: PathBuf,
    retention: Duration,
}

impl FileTranscriptCache {
    pub fn new(directory: PathBuf, retention: Duration) -> Self {
        Self {
            directory,
            retention,
        }
    }

    /// Map a video id to its entry path, rejecting ids outside the provider's
    /// identifier alphabet so cache keys can never escape the directory.
    fn entry_path(&self, video_id: &str) -> AppResult<PathBuf> {
        if video_id.is_empty()
            || !video_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AppError::invalid_input(format!(
                "Invalid video id for cache key: {video_id}"
            )));
        }

        Ok(self.directory.join(format!("{video_id}.json")))
    }
}

#[async_trait]
impl TranscriptCache for FileTranscriptCache {
    async fn read(&self, video_id: &str) -> AppResult<Option<TranscriptResult>> {
        let path = self.entry_path(video_id)?;

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::cache(format!("stat {}: {e}", path.display()))),
        };

        let modified = metadata
            .modified()
            .map_err(|e| AppError::cache(format!("mtime {}: {e}", path.display())))?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.retention {
            debug!("Cache entry for {} expired ({:?} old), ignoring", video_id, age);
            return Ok(None);
        }

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Unreadable cache entry for {}: {}", video_id, e);
                return Ok(None);
            }
        };

        match serde_json::from_str(&contents) {
            Ok(result) => {
                debug!("Cache hit for {}", video_id);
                Ok(Some(result))
            }
            Err(e) => {
                warn!("Corrupt cache entry for {}: {}", video_id, e);
                Ok(None)
            }
        }
    }

    async fn write(&self, video_id: &str, result: &TranscriptResult) -> AppResult<()> {
        let path = self.entry_path(video_id)?;

        fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| AppError::cache(format!("mkdir {}: {e}", self.directory.display())))?;

        let contents = serde_json::to_string_pretty(result)
            .map_err(|e| AppError::cache(format!("serialize entry for {video_id}: {e}")))?;

        fs::write(&path, contents)
            .await
            .map_err(|e| AppError::cache(format!("write {}: {e}", path.display())))?;

        debug!("Cached result for {} (success={})", video_id, result.success);
        Ok(())
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Top-level application configuration
///
/// Loaded from a TOML file; every field carries a default so a missing or
/// partial file still produces a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    /// Ordered language preference; a trailing implicit "en" fallback is
    /// always attempted by the fetcher regardless of this list
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub camouflage: CamouflageConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub chapters: ChaptersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// On-disk transcript cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding one JSON file per cached video id
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Staleness window; entries older than this are ignored, not deleted
    #[serde(default = "default_cache_retention")]
    pub retention: String,
}

/// Request camouflage and shared HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamouflageConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: String,
    /// Lower bound of the pre-request jitter sleep
    #[serde(default = "default_jitter_min")]
    pub jitter_min: String,
    /// Upper bound of the pre-request jitter sleep
    #[serde(default = "default_jitter_max")]
    pub jitter_max: String,
    /// Total attempts per request, retried only on 429/500/502/503/504
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// First retry backoff; doubles on each further retry
    #[serde(default = "default_retry_initial_backoff")]
    pub retry_initial_backoff: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Calls-per-minute budget for the rate-limited acquisition path
    #[serde(default = "default_calls_per_minute")]
    pub calls_per_minute: u32,
}

/// Fallback orchestrator timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Unconditional pause before the slow-retry strategy
    #[serde(default = "default_slow_retry_delay")]
    pub slow_retry_delay: String,
    /// Base unit for the `2^i * uniform(1,3)` inter-strategy backoff
    #[serde(default = "default_backoff_base")]
    pub backoff_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaptersConfig {
    /// External chapters collaborator endpoint
    #[serde(default = "default_chapters_endpoint")]
    pub endpoint: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_languages() -> Vec<String> {
    vec!["id".to_string(), "en".to_string()]
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("./data/transcript-cache")
}

fn default_cache_retention() -> String {
    "24h".to_string()
}

fn default_connect_timeout() -> String {
    "10s".to_string()
}

fn default_jitter_min() -> String {
    "500ms".to_string()
}

fn default_jitter_max() -> String {
    "2s".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_initial_backoff() -> String {
    "1s".to_string()
}

fn default_calls_per_minute() -> u32 {
    20
}

fn default_slow_retry_delay() -> String {
    "5s".to_string()
}

fn default_backoff_base() -> String {
    "1s".to_string()
}

fn default_chapters_endpoint() -> String {
    "https://nadamu.vpsalfach.my.id/api/chapters/".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            retention: default_cache_retention(),
        }
    }
}

impl Default for CamouflageConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            jitter_min: default_jitter_min(),
            jitter_max: default_jitter_max(),
            max_attempts: default_max_attempts(),
            retry_initial_backoff: default_retry_initial_backoff(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            calls_per_minute: default_calls_per_minute(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            slow_retry_delay: default_slow_retry_delay(),
            backoff_base: default_backoff_base(),
        }
    }
}

impl Default for ChaptersConfig {
    fn default() -> Self {
        Self {
            endpoint: default_chapters_endpoint(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            languages: default_languages(),
            cache: CacheConfig::default(),
            camouflage: CamouflageConfig::default(),
            rate_limit: RateLimitConfig::default(),
            fallback: FallbackConfig::default(),
            chapters: ChaptersConfig::default(),
        }
    }
}

fn parse_duration(value: &str, field: &str) -> Result<Duration> {
    humantime::parse_duration(value).with_context(|| format!("Invalid duration for {field}: {value}"))
}

impl CacheConfig {
    pub fn retention(&self) -> Result<Duration> {
        parse_duration(&self.retention, "cache.retention")
    }
}

impl CamouflageConfig {
    pub fn connect_timeout(&self) -> Result<Duration> {
        parse_duration(&self.connect_timeout, "camouflage.connect_timeout")
    }

    pub fn jitter_min(&self) -> Result<Duration> {
        parse_duration(&self.jitter_min, "camouflage.jitter_min")
    }

    pub fn jitter_max(&self) -> Result<Duration> {
        parse_duration(&self.jitter_max, "camouflage.jitter_max")
    }

    pub fn retry_initial_backoff(&self) -> Result<Duration> {
        parse_duration(&self.retry_initial_backoff, "camouflage.retry_initial_backoff")
    }
}

impl FallbackConfig {
    pub fn slow_retry_delay(&self) -> Result<Duration> {
        parse_duration(&self.slow_retry_delay, "fallback.slow_retry_delay")
    }

    pub fn backoff_base(&self) -> Result<Duration> {
        parse_duration(&self.backoff_base, "fallback.backoff_base")
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = Config::default();

        assert_eq!(config.web.port, 4000);
        assert_eq!(config.languages, vec!["id", "en"]);
        assert_eq!(config.rate_limit.calls_per_minute, 20);
        assert_eq!(config.cache.retention().unwrap(), Duration::from_secs(24 * 3600));
        assert_eq!(config.fallback.slow_retry_delay().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            languages = ["de"]

            [web]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.web.port, 8080);
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.languages, vec!["de"]);
        assert_eq!(config.camouflage.max_attempts, 3);
    }

    #[test]
    fn invalid_duration_is_reported_with_field_name() {
        let config = CacheConfig {
            path: default_cache_path(),
            retention: "not-a-duration".to_string(),
        };

        let err = config.retention().unwrap_err().to_string();
        assert!(err.contains("cache.retention"));
    }
}

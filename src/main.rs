use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_proxy::{
    config::Config,
    provider::{InnerTubeProvider, TranscriptProvider},
    services::{
        ChapterEnrichmentService, FallbackOrchestrator, FallbackPolicy, FileTranscriptCache,
        RateLimiter, TranscriptFetcher,
    },
    utils::{CamouflageOptions, CamouflagedHttpClient},
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "transcript-proxy")]
#[command(version = "0.1.0")]
#[command(about = "YouTube transcript proxy with caching, rate limiting and layered fallback")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("transcript_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("transcript_proxy={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting transcript proxy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let http = Arc::new(CamouflagedHttpClient::new(CamouflageOptions {
        connect_timeout: config.camouflage.connect_timeout()?,
        jitter_min: config.camouflage.jitter_min()?,
        jitter_max: config.camouflage.jitter_max()?,
        max_attempts: config.camouflage.max_attempts,
        retry_initial_backoff: config.camouflage.retry_initial_backoff()?,
    }));

    let provider: Arc<dyn TranscriptProvider> =
        Arc::new(InnerTubeProvider::new(http.clone()));
    let cache = Arc::new(FileTranscriptCache::new(
        config.cache.path.clone(),
        config.cache.retention()?,
    ));
    let limiter = Arc::new(RateLimiter::per_minute(config.rate_limit.calls_per_minute));

    let orchestrator = Arc::new(FallbackOrchestrator::new(
        TranscriptFetcher::new(provider.clone()),
        provider,
        cache,
        limiter,
        FallbackPolicy {
            slow_retry_delay: config.fallback.slow_retry_delay()?,
            backoff_base: config.fallback.backoff_base()?,
        },
    ));

    let chapters = Arc::new(ChapterEnrichmentService::new(
        http,
        orchestrator.clone(),
        config.chapters.endpoint.clone(),
        config.languages.clone(),
    ));

    let state = AppState {
        orchestrator,
        chapters,
        default_languages: config.languages.clone(),
    };

    let server = WebServer::new(state, &config.web.host, config.web.port)?;
    server.serve().await
}

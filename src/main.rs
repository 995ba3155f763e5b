mod cache;
mod config;
mod error;
mod gemini;
mod github;
mod http;
mod lenient;
mod prompt;
mod status;
mod summary;
#[cfg(test)]
mod testing;

use clap::Parser;
use tracing::info;

use cache::{SummaryCache, SystemClock};
use config::{Config, mask_key};
use gemini::GeminiClient;
use github::GitHubClient;
use status::StatusService;
use summary::{DevLogGenerator, TextModel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(_) => info!("No .env file found, relying on system env vars"),
    }

    let config = Config::parse();
    config.validate()?;

    info!("Starting sentinel v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded API Key: {}", mask_key(config.api_key()));

    let timeout = config.request_timeout();
    let events = GitHubClient::new(
        &config.github_username,
        config.github_token.as_deref(),
        timeout,
    )?;
    let model = match config.api_key() {
        Some(key) => Some(
            Box::new(GeminiClient::new(key, &config.gemini_model, timeout)?) as Box<dyn TextModel>,
        ),
        None => None,
    };
    let generator = DevLogGenerator::new(config.author_name.clone(), Box::new(events), model);

    let service = StatusService::new(
        SummaryCache::new(config.cache_ttl()),
        Box::new(generator),
        Box::new(SystemClock),
    );
    let app = http::create_router(http::AppState::new(service));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Sentinel listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

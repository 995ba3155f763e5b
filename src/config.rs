use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::gemini::DEFAULT_MODEL;

#[derive(Parser, Debug, Clone)]
#[command(name = "sentinel")]
#[command(about = "Serves a one-line summary of recent GitHub activity")]
pub struct Config {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Gemini API key; without it the service reports a placeholder summary
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model used for generation
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// GitHub user whose public activity is summarized
    #[arg(long, env = "GITHUB_USERNAME", default_value = "PranavAgarkar07")]
    pub github_username: String,

    /// Optional GitHub token (raises the API rate limit)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Name the summary is written as
    #[arg(long, env = "SENTINEL_AUTHOR_NAME", default_value = "Pranav Agarkar")]
    pub author_name: String,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "SENTINEL_REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// How long a generated summary is served from cache, in seconds
    #[arg(long, env = "SENTINEL_CACHE_TTL_SECS", default_value = "300")]
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// The Gemini key, treating an empty value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.github_username.trim().is_empty() {
            anyhow::bail!("github username must not be empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request timeout must be at least one second");
        }
        Ok(())
    }
}

/// Render a key for logs without revealing it.
pub fn mask_key(key: Option<&str>) -> String {
    match key {
        Some(key) if key.len() > 10 && key.is_ascii() => {
            format!("{}...{}", &key[..4], &key[key.len() - 4..])
        }
        _ => "[EMPTY] or [INVALID LENGTH]".to_string(),
    }
}

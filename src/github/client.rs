// GitHub API HTTP client.
// Handles headers, optional authentication, timeouts, and response status mapping.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, SentinelError};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client bound to the single identity whose activity is summarized.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    username: String,
}

impl GitHubClient {
    /// Create a new client. The token is optional; public events need none.
    pub fn new(username: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| SentinelError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("sentinel-devlog"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(SentinelError::Api)?;

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
            username: username.to_string(),
        })
    }

    /// Point the client at a different API root (GitHub Enterprise, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The identity whose events are fetched.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).send().await.map_err(SentinelError::Api)?;

        check_response(response).await
    }
}

/// Read a numeric rate limit header.
fn header_u64(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::UNAUTHORIZED => Err(SentinelError::Unauthorized),
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(SentinelError::NotFound(url))
        }
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
            if header_u64(&response, "x-ratelimit-remaining") == Some(0) =>
        {
            let reset_at = header_u64(&response, "x-ratelimit-reset")
                .and_then(|reset| chrono::DateTime::from_timestamp(reset as i64, 0))
                .map(|dt| dt.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Err(SentinelError::RateLimited { reset_at })
        }
        status => Err(SentinelError::Upstream {
            service: "github",
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}

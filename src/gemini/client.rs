// Gemini generative-language API client.
// Sends single-turn prompts and extracts the first generated text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, SentinelError};
use crate::summary::TextModel;

use super::types::{GenerateContentRequest, GenerateContentResponse};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Header carrying the API key, so it never appears in request URLs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Returned when a successful response carries no usable text.
pub const FALLBACK_SUMMARY: &str = "Analysis complete. Systems nominal (Default Response).";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SentinelError::Api)?;

        Ok(Self {
            client,
            base_url: GEMINI_API_BASE.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Call generateContent and return the decoded response.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        let body = response.text().await.map_err(redact)?;
        if status != StatusCode::OK {
            return Err(SentinelError::Upstream {
                service: "gemini",
                status: status.as_u16(),
                body,
            });
        }

        let object: serde_json::Map<String, Value> = serde_json::from_str(&body)?;
        Ok(GenerateContentResponse::from_value(Value::Object(object)))
    }
}

/// Strip the request URL from transport errors before they reach logs or
/// response bodies.
fn redact(err: reqwest::Error) -> SentinelError {
    SentinelError::Api(err.without_url())
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::single_turn(prompt);
        let response = self.generate_content(&request).await?;

        match response.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!(model = %self.model, "gemini response had no candidate text");
                Ok(FALLBACK_SUMMARY.to_string())
            }
        }
    }
}

// GitHub API endpoint functions.
// Fetches the public events feed and exposes it as an event digest source.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::summary::EventSource;

use super::client::GitHubClient;
use super::digest::build_digest;
use super::types::Event;

impl GitHubClient {
    /// Get the most recent public events for the configured user, newest first
    /// as GitHub returns them.
    pub async fn get_public_events(&self) -> Result<Vec<Event>> {
        let response = self
            .get(&format!("/users/{}/events/public", self.username()))
            .await?;
        let body = response.text().await?;
        let raw: Vec<Value> = serde_json::from_str(&body)?;
        Ok(raw.into_iter().map(Event::from_value).collect())
    }
}

#[async_trait]
impl EventSource for GitHubClient {
    async fn fetch_digest(&self) -> Result<String> {
        let events = self.get_public_events().await?;
        debug!(count = events.len(), user = self.username(), "fetched github events");
        Ok(build_digest(&events))
    }
}

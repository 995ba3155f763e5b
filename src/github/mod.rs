// GitHub API module.
// Provides the client, event types, and digest builder for the public events feed.

pub mod client;
pub mod digest;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;

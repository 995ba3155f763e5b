// Summary generation.
// Seams for the upstream event feed and the text model, and the generator
// that joins them into a one-sentence dev log.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::prompt::build_devlog_prompt;

/// Returned as the summary when no model credential is configured.
pub const MISSING_KEY_SUMMARY: &str = "System Error: Neural Link Disconnected (Missing API Key). Please configure the satellite uplink.";

/// Source of a textual activity digest.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_digest(&self) -> Result<String>;
}

/// A model that completes a single prompt.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Anything that can produce a fresh summary for the status cache.
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn generate(&self) -> Result<String>;
}

/// Generates the dev log sentence from recent activity.
pub struct DevLogGenerator {
    author: String,
    events: Box<dyn EventSource>,
    /// `None` when no credential is configured.
    model: Option<Box<dyn TextModel>>,
}

impl DevLogGenerator {
    pub fn new(
        author: impl Into<String>,
        events: Box<dyn EventSource>,
        model: Option<Box<dyn TextModel>>,
    ) -> Self {
        Self {
            author: author.into(),
            events,
            model,
        }
    }
}

#[async_trait]
impl SummarySource for DevLogGenerator {
    async fn generate(&self) -> Result<String> {
        let Some(model) = &self.model else {
            warn!("no model credential configured, returning placeholder summary");
            return Ok(MISSING_KEY_SUMMARY.to_string());
        };

        let digest = self.events.fetch_digest().await?;
        debug!(lines = digest.lines().count(), "built event digest");

        let prompt = build_devlog_prompt(&self.author, &digest);
        model.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::SentinelError;

    struct FakeEvents {
        calls: Arc<AtomicUsize>,
        result: fn() -> Result<String>,
    }

    #[async_trait]
    impl EventSource for FakeEvents {
        async fn fetch_digest(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    struct FakeModel {
        prompts: Arc<Mutex<Vec<String>>>,
        reply: fn() -> Result<String>,
    }

    #[async_trait]
    impl TextModel for FakeModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.reply)()
        }
    }

    fn digest() -> Result<String> {
        Ok("- PushEvent on me/site: fix bug: add test\n".to_string())
    }

    fn reply() -> Result<String> {
        Ok("I fixed a bug and added tests.".to_string())
    }

    fn upstream_down() -> Result<String> {
        Err(SentinelError::Upstream {
            service: "github",
            status: 500,
            body: String::new(),
        })
    }

    #[tokio::test]
    async fn test_missing_credential_skips_upstream() {
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = DevLogGenerator::new(
            "me",
            Box::new(FakeEvents {
                calls: calls.clone(),
                result: digest,
            }),
            None,
        );

        let summary = generator.generate().await.unwrap();

        assert_eq!(summary, MISSING_KEY_SUMMARY);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_passes_digest_to_model() {
        let calls = Arc::new(AtomicUsize::new(0));
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let generator = DevLogGenerator::new(
            "Ada",
            Box::new(FakeEvents {
                calls: calls.clone(),
                result: digest,
            }),
            Some(Box::new(FakeModel {
                prompts: prompts.clone(),
                reply,
            })),
        );

        let summary = generator.generate().await.unwrap();

        assert_eq!(summary, "I fixed a bug and added tests.");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- PushEvent on me/site: fix bug: add test\n"));
        assert!(prompts[0].starts_with("You are Ada,"));
    }

    #[tokio::test]
    async fn test_event_failure_skips_model() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let generator = DevLogGenerator::new(
            "me",
            Box::new(FakeEvents {
                calls: Arc::new(AtomicUsize::new(0)),
                result: upstream_down,
            }),
            Some(Box::new(FakeModel {
                prompts: prompts.clone(),
                reply,
            })),
        );

        let err = generator.generate().await.unwrap_err();

        assert!(matches!(err, SentinelError::Upstream { service: "github", .. }));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let generator = DevLogGenerator::new(
            "me",
            Box::new(FakeEvents {
                calls: Arc::new(AtomicUsize::new(0)),
                result: digest,
            }),
            Some(Box::new(FakeModel {
                prompts: Arc::new(Mutex::new(Vec::new())),
                reply: upstream_down,
            })),
        );

        assert!(generator.generate().await.is_err());
    }
}

// Status orchestration.
// Decides per request whether to serve the cached summary, regenerate it, or
// fall back to the last good summary when regeneration fails.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::cache::{CachedSummary, Clock, SummaryCache};
use crate::summary::SummarySource;

/// Summary shown when nothing can be served.
pub const OFFLINE_SUMMARY: &str = "System Update: Offline (Retrying...)";

const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a served summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// Generated during this request.
    Live,
    /// Fresh cached value.
    Cache,
    /// Expired cached value served because regeneration failed.
    StaleCache,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Live => "live",
            Source::Cache => "cache",
            Source::StaleCache => "stale-cache",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub summary: String,
    pub last_update: String,
    pub source: Source,
}

impl StatusResponse {
    fn from_cached(entry: &CachedSummary, source: Source) -> Self {
        Self {
            summary: entry.text.clone(),
            last_update: entry.generated_at.format(LAST_UPDATE_FORMAT).to_string(),
            source,
        }
    }
}

/// Regeneration failed and there was no earlier summary to fall back on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{error}")]
pub struct StatusError {
    /// Description of the underlying failure.
    pub error: String,
    /// Placeholder summary for clients that only render `summary`.
    pub summary: String,
}

impl StatusError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            summary: OFFLINE_SUMMARY.to_string(),
        }
    }
}

/// Owns the summary cache and the source used to refresh it.
pub struct StatusService {
    cache: SummaryCache,
    source: Box<dyn SummarySource>,
    clock: Box<dyn Clock>,
}

impl StatusService {
    pub fn new(cache: SummaryCache, source: Box<dyn SummarySource>, clock: Box<dyn Clock>) -> Self {
        Self {
            cache,
            source,
            clock,
        }
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// Resolve the current status.
    ///
    /// The cache lock is held for the whole call, so concurrent callers during
    /// a refresh wait for it and then see its outcome, including a failure.
    /// A failed refresh leaves the cached entry untouched; a call that starts
    /// after the failure has been recorded tries again.
    pub async fn get_status(&self) -> Result<StatusResponse, StatusError> {
        let seen = self.cache.attempts();
        let mut slot = self.cache.lock().await;

        let now = self.clock.now();
        if let Some(cached) = slot.entry.as_ref().filter(|cached| cached.is_fresh(now)) {
            debug!("serving summary from cache");
            return Ok(StatusResponse::from_cached(cached, Source::Cache));
        }

        // A refresh finished while this call was queued on the lock.
        if self.cache.attempts() != seen {
            if let Some(failure) = slot.last_failure.clone() {
                debug!("sharing outcome of the refresh that just failed");
                return fallback(slot.entry.as_ref(), failure);
            }
        }

        info!("summary cache expired or empty, regenerating");
        match self.source.generate().await {
            Ok(text) => {
                let fresh = CachedSummary::new(text, self.clock.now(), self.cache.ttl());
                let response = StatusResponse::from_cached(&fresh, Source::Live);
                self.cache.finish_attempt(&mut slot, Ok(fresh));
                Ok(response)
            }
            Err(err) => {
                let failure = err.to_string();
                self.cache.finish_attempt(&mut slot, Err(failure.clone()));
                match slot.entry.as_ref().filter(|cached| cached.has_text()) {
                    Some(_) => warn!(error = %err, "summary regeneration failed, serving stale cache"),
                    None => error!(error = %err, "summary regeneration failed with nothing cached"),
                }
                fallback(slot.entry.as_ref(), failure)
            }
        }
    }
}

/// Outcome of a failed refresh: the last good summary if there is one.
fn fallback(entry: Option<&CachedSummary>, failure: String) -> Result<StatusResponse, StatusError> {
    match entry.filter(|cached| cached.has_text()) {
        Some(stale) => Ok(StatusResponse::from_cached(stale, Source::StaleCache)),
        None => Err(StatusError::new(failure)),
    }
}

// Cache store for the generated summary.
// One entry, replaced whole under an async lock, with TTL checking and a
// record of the last refresh attempt.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, MutexGuard};

/// Default TTL for a generated summary: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A generated summary with its freshness window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSummary {
    /// The summary text.
    pub text: String,
    /// When the summary was generated.
    pub generated_at: DateTime<Utc>,
    /// First instant at which the summary is no longer fresh.
    pub expires_at: DateTime<Utc>,
}

impl CachedSummary {
    /// Create an entry generated at `now` that stays fresh for `ttl`.
    pub fn new(text: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            text: text.into(),
            generated_at: now,
            expires_at,
        }
    }

    /// Check if this entry is still fresh at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Whether the entry can be served as a stale fallback.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// State guarded by the cache lock.
#[derive(Debug, Default)]
pub struct CacheSlot {
    /// Last successfully generated summary.
    pub entry: Option<CachedSummary>,
    /// Error description of the most recent refresh attempt, if it failed.
    pub last_failure: Option<String>,
}

/// Process-wide holder of the single cached summary.
///
/// The lock is meant to be held across a whole check-and-refresh sequence,
/// including the upstream calls, so at most one refresh runs at a time.
#[derive(Debug)]
pub struct SummaryCache {
    slot: Mutex<CacheSlot>,
    /// Number of refresh attempts that have completed. Bumped under the lock.
    attempts: AtomicU64,
    ttl: Duration,
}

impl SummaryCache {
    /// Create an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(CacheSlot::default()),
            attempts: AtomicU64::new(0),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Acquire exclusive access to the slot.
    pub async fn lock(&self) -> MutexGuard<'_, CacheSlot> {
        self.slot.lock().await
    }

    /// Completed refresh attempts so far. Readable without the lock.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Record the outcome of a refresh. The caller must hold the slot guard.
    pub fn finish_attempt(&self, slot: &mut CacheSlot, outcome: Result<CachedSummary, String>) {
        match outcome {
            Ok(entry) => {
                slot.entry = Some(entry);
                slot.last_failure = None;
            }
            Err(failure) => slot.last_failure = Some(failure),
        }
        self.attempts.fetch_add(1, Ordering::SeqCst);
    }

    /// Copy of the current entry, fresh or not.
    #[cfg(test)]
    pub async fn snapshot(&self) -> Option<CachedSummary> {
        self.slot.lock().await.entry.clone()
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_entry_window() {
        let entry = CachedSummary::new("hello", start(), DEFAULT_TTL);

        assert_eq!(entry.generated_at, start());
        assert_eq!(entry.expires_at, start() + TimeDelta::minutes(5));
    }

    #[test]
    fn test_fresh_until_expiry() {
        let entry = CachedSummary::new("hello", start(), DEFAULT_TTL);

        assert!(entry.is_fresh(start()));
        assert!(entry.is_fresh(start() + TimeDelta::seconds(299)));
        assert!(!entry.is_fresh(start() + TimeDelta::seconds(300)));
        assert!(!entry.is_fresh(start() + TimeDelta::minutes(10)));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CachedSummary::new("hello", start(), Duration::MAX);
        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_empty_text_not_servable() {
        assert!(!CachedSummary::new("", start(), DEFAULT_TTL).has_text());
        assert!(CachedSummary::new("x", start(), DEFAULT_TTL).has_text());
    }

    #[tokio::test]
    async fn test_cache_starts_empty() {
        let cache = SummaryCache::default();

        assert_eq!(cache.ttl(), DEFAULT_TTL);
        assert_eq!(cache.attempts(), 0);
        assert!(cache.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_attempt_keeps_entry() {
        let cache = SummaryCache::default();
        {
            let mut slot = cache.lock().await;
            cache.finish_attempt(&mut slot, Ok(CachedSummary::new("one", start(), DEFAULT_TTL)));
            cache.finish_attempt(&mut slot, Err("boom".to_string()));
            assert_eq!(slot.last_failure.as_deref(), Some("boom"));
        }

        assert_eq!(cache.attempts(), 2);
        assert_eq!(cache.snapshot().await.unwrap().text, "one");
    }

    #[tokio::test]
    async fn test_success_clears_failure() {
        let cache = SummaryCache::default();
        let mut slot = cache.lock().await;
        cache.finish_attempt(&mut slot, Err("boom".to_string()));
        cache.finish_attempt(&mut slot, Ok(CachedSummary::new("two", start(), DEFAULT_TTL)));

        assert!(slot.last_failure.is_none());
        assert_eq!(slot.entry.as_ref().unwrap().text, "two");
    }
}

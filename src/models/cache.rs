use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

pub const CACHE_DURATION: Duration = Duration::from_secs(5 * 60);

/// Source of "now" for freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub data: Value,
    pub fetched_at: Instant,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Raw JSON bodies keyed by a logical name, each with its own fetch time.
pub struct FetchCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl FetchCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave a half-written entry behind.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        self.entries()
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.data.clone())
    }

    pub fn insert(&self, key: impl Into<String>, data: Value) {
        let entry = CacheEntry {
            data,
            fetched_at: self.clock.now(),
        };
        self.entries().insert(key.into(), entry);
    }

    /// Returns the cached value for `key` when fresh, otherwise runs `fetch_fn`
    /// and stores its result. A failed fetch leaves the existing entry untouched.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        force_fresh: bool,
        fetch_fn: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if !force_fresh {
            if let Some(data) = self.get(key) {
                debug!("Cache hit for {}", key);
                return Ok(data);
            }
        }

        debug!("Cache miss for {} (force_fresh={})", key, force_fresh);
        let data = fetch_fn().await?;
        self.insert(key, data.clone());
        Ok(data)
    }

    pub fn invalidate(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new(CACHE_DURATION)
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache_with_clock() -> (FetchCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = FetchCache::with_clock(CACHE_DURATION, clock.clone());
        (cache, clock)
    }

    async fn counted_fetch(
        cache: &FetchCache,
        key: &str,
        force_fresh: bool,
        calls: &AtomicUsize,
        value: Value,
    ) -> Result<Value, String> {
        cache
            .get_or_fetch(key, force_fresh, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            })
            .await
    }

    #[tokio::test]
    async fn test_second_call_within_window_is_a_hit() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);

        let first = counted_fetch(&cache, "schedules", false, &calls, json!({"n": 1})).await;
        clock.advance(Duration::from_secs(60));
        let second = counted_fetch(&cache, "schedules", false, &calls, json!({"n": 2})).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.unwrap(), json!({"n": 1}));
        assert_eq!(second.unwrap(), json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_call_after_window_fetches_again() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);

        counted_fetch(&cache, "schedules", false, &calls, json!(1)).await.unwrap();
        clock.advance(CACHE_DURATION);
        let value = counted_fetch(&cache, "schedules", false, &calls, json!(2)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(value.unwrap(), json!(2));
    }

    #[tokio::test]
    async fn test_force_fresh_bypasses_fresh_entry() {
        let (cache, _clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);

        counted_fetch(&cache, "roster-TOR", false, &calls, json!("old")).await.unwrap();
        let value = counted_fetch(&cache, "roster-TOR", true, &calls, json!("new")).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(value.unwrap(), json!("new"));
        assert_eq!(cache.get("roster-TOR"), Some(json!("new")));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_entry() {
        let (cache, _clock) = cache_with_clock();
        cache.insert("schedules", json!("kept"));

        let result: Result<Value, String> = cache
            .get_or_fetch("schedules", true, || async { Err("boom".to_string()) })
            .await;

        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(cache.get("schedules"), Some(json!("kept")));
    }

    #[tokio::test]
    async fn test_keys_expire_independently() {
        let (cache, clock) = cache_with_clock();
        cache.insert("schedules", json!("s"));
        clock.advance(Duration::from_secs(4 * 60));
        cache.insert("roster-TOR", json!("r"));
        clock.advance(Duration::from_secs(2 * 60));

        // Writing the roster must not have refreshed the schedule.
        assert_eq!(cache.get("schedules"), None);
        assert_eq!(cache.get("roster-TOR"), Some(json!("r")));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = FetchCache::default();
        cache.insert("a", json!(1));
        cache.insert("b", json!(2));

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}

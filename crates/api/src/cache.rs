use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Duration, Utc};

use study_core::Clock;

/// Time-to-live cache from request key to `(value, cached_at)`.
///
/// Expiry is lazy: an entry older than the TTL is evicted on the read that
/// observes it. Single-flow cooperative callers only; there is no interior
/// locking.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, (V, DateTime<Utc>)>,
    ttl: Duration,
    clock: Clock,
}

impl<V> TtlCache<V> {
    pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_ttl(clock, Duration::seconds(Self::DEFAULT_TTL_SECS))
    }

    #[must_use]
    pub fn with_ttl(clock: Clock, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Look up a fresh entry, evicting it first if it has outlived the TTL.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some((_, cached_at)) => now - *cached_at > self.ttl,
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|(value, _)| value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), (value, self.clock.now()));
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry whose key contains `pattern`.
    pub fn remove_matching(&mut self, pattern: &str) {
        self.entries.retain(|key, _| !key.contains(pattern));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached value for `key`, or run `fetcher` and cache its
    /// result. A failed fetch caches nothing.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error unchanged.
    pub async fn get_or_fetch<F, Fut, E>(&mut self, key: &str, fetcher: F) -> Result<V, E>
    where
        V: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value.clone());
        }

        let value = fetcher().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_clock;

    #[test]
    fn entries_survive_within_ttl() {
        let mut cache = TtlCache::new(fixed_clock());
        cache.insert("courses", 3_u32);

        cache.clock.advance(Duration::seconds(TtlCache::<u32>::DEFAULT_TTL_SECS - 1));
        assert_eq!(cache.get("courses"), Some(&3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stale_entries_are_evicted_on_read() {
        let mut cache = TtlCache::with_ttl(fixed_clock(), Duration::seconds(60));
        cache.insert("courses", 3_u32);

        cache.clock.advance(Duration::seconds(61));
        assert_eq!(cache.get("courses"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn remove_matching_drops_by_substring() {
        let mut cache = TtlCache::new(fixed_clock());
        cache.insert("sessions:user=1:course=2", 1_u32);
        cache.insert("sessions:user=1:course=3", 2_u32);
        cache.insert("courses:user=1", 3_u32);

        cache.remove_matching("sessions:");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("courses:user=1"), Some(&3));
    }

    #[tokio::test]
    async fn get_or_fetch_hits_fetcher_once() {
        let mut cache = TtlCache::new(fixed_clock());

        let first: Result<u32, ()> = cache.get_or_fetch("key", || async { Ok(7) }).await;
        assert_eq!(first, Ok(7));

        // Second read must come from the cache, not the fetcher.
        let second: Result<u32, ()> = cache.get_or_fetch("key", || async { Err(()) }).await;
        assert_eq!(second, Ok(7));
    }

    #[tokio::test]
    async fn failed_fetch_caches_nothing() {
        let mut cache = TtlCache::new(fixed_clock());

        let failed: Result<u32, &str> = cache.get_or_fetch("key", || async { Err("down") }).await;
        assert_eq!(failed, Err("down"));
        assert!(cache.is_empty());
    }
}

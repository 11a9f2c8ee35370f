use crate::ports::outbound::Clock;
use crate::shared::Result;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::any::Any;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

/// Expiration and tags applied to a cache entry
#[derive(Debug, Clone)]
pub struct CacheEntryOptions {
    expiration: Duration,
    tags: BTreeSet<String>,
}

impl CacheEntryOptions {
    /// Entries expire `expiration` after they are stored
    pub fn new(expiration: Duration) -> Self {
        Self {
            expiration,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }
}

struct CacheEntry {
    value: Box<dyn Any + Send + Sync>,
    expires_at: DateTime<Utc>,
    tags: BTreeSet<String>,
}

/// In-memory key/value cache with absolute expiration and tag eviction.
///
/// Values of any `Clone` type can be stored; a lookup with a different type
/// than the one stored is a miss. Entries are never refreshed proactively:
/// expired entries are dropped when next read.
///
/// Concurrent misses for the same key each run their factory; only
/// side-effect-free reads are cached, so duplicates are harmless. A factory
/// that fails, or whose future is dropped before completing, stores nothing.
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Returns the cached value for `key`, or runs `factory` and caches its result
    pub async fn get_or_create<T, F, Fut>(
        &self,
        key: &str,
        options: &CacheEntryOptions,
        factory: F,
    ) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.get::<T>(key) {
            return Ok(cached);
        }

        let value = factory().await?;
        self.set(key, value.clone(), options);
        Ok(value)
    }

    /// Returns an unexpired value for `key`
    pub fn get<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        let now = self.clock.now();

        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => {
                return entry.value.downcast_ref::<T>().cloned();
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }

        None
    }

    pub fn set<T: Send + Sync + 'static>(&self, key: &str, value: T, options: &CacheEntryOptions) {
        let entry = CacheEntry {
            value: Box::new(value),
            expires_at: self.clock.now() + options.expiration,
            tags: options.tags.clone(),
        };
        self.entries.insert(key.to_string(), entry);
    }

    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Evicts every entry carrying `tag`, returning how many were removed
    pub fn remove_by_tag(&self, tag: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.tags.contains(tag);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::clock::ManualClock;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> (Arc<ManualClock>, MemoryCache) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        ));
        let cache = MemoryCache::new(clock.clone());
        (clock, cache)
    }

    #[tokio::test]
    async fn test_get_or_create_caches_value() {
        let (_, cache) = cache();
        let calls = AtomicUsize::new(0);
        let options = CacheEntryOptions::new(Duration::hours(1));

        for _ in 0..3 {
            let value = cache
                .get_or_create("npm:left-pad@1.3.0", &options, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["stevemao".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(value, vec!["stevemao".to_string()]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let (clock, cache) = cache();
        let options = CacheEntryOptions::new(Duration::minutes(9));
        cache.set("token", "first".to_string(), &options);

        clock.advance(Duration::minutes(8));
        assert_eq!(cache.get::<String>("token").as_deref(), Some("first"));

        clock.advance(Duration::minutes(1));
        assert!(cache.get::<String>("token").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_failed_factory_is_not_cached() {
        let (_, cache) = cache();
        let options = CacheEntryOptions::new(Duration::hours(1));

        let result: Result<String> = cache
            .get_or_create("key", &options, || async { Err(anyhow::anyhow!("boom")) })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty());

        let value = cache
            .get_or_create("key", &options, || async { Ok("ok".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "ok");
    }

    #[tokio::test]
    async fn test_cancelled_factory_is_not_cached() {
        let (_, cache) = cache();
        let options = CacheEntryOptions::new(Duration::hours(1));

        let pending = cache.get_or_create("slow", &options, || async {
            futures::future::pending::<()>().await;
            Ok("never".to_string())
        });
        let outcome = tokio::time::timeout(std::time::Duration::from_millis(10), pending).await;

        assert!(outcome.is_err());
        assert!(cache.get::<String>("slow").is_none());
    }

    #[test]
    fn test_remove_by_tag() {
        let (_, cache) = cache();
        let npm = CacheEntryOptions::new(Duration::hours(1)).with_tags(["all", "npm"]);
        let github = CacheEntryOptions::new(Duration::hours(1)).with_tags(["all", "github"]);
        cache.set("a", 1u32, &npm);
        cache.set("b", 2u32, &npm);
        cache.set("c", 3u32, &github);

        assert_eq!(cache.remove_by_tag("npm"), 2);
        assert_eq!(cache.get::<u32>("c"), Some(3));
        assert_eq!(cache.remove_by_tag("all"), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_by_tag_during_concurrent_inserts() {
        let (_, cache) = cache();
        let cache = Arc::new(cache);
        let npm = CacheEntryOptions::new(Duration::hours(1)).with_tags(["all", "npm"]);

        let writers: Vec<_> = (0..4)
            .map(|writer| {
                let cache = Arc::clone(&cache);
                let npm = npm.clone();
                std::thread::spawn(move || {
                    for i in 0..5_000u32 {
                        cache.set(&format!("npm:{}:{}", writer, i), i, &npm);
                    }
                })
            })
            .collect();

        for _ in 0..20_000 {
            assert_eq!(cache.remove_by_tag("github"), 0);
        }
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(cache.len(), 20_000);
        assert_eq!(cache.remove_by_tag("npm"), 20_000);
    }

    #[test]
    fn test_type_mismatch_is_miss() {
        let (_, cache) = cache();
        cache.set("k", 1u32, &CacheEntryOptions::new(Duration::hours(1)));
        assert!(cache.get::<String>("k").is_none());
    }
}

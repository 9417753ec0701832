use crate::ports::outbound::{SwhRelease, SwhReleaseLookup};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingSwhReleaseLookup wraps a SwhReleaseLookup and adds in-memory caching.
///
/// Decorator over any lookup. Releases are deduplicated within one document
/// already, so hits come from converting several documents with the same
/// use case. Failed lookups are not cached.
pub struct CachingSwhReleaseLookup<L: SwhReleaseLookup> {
    inner: L,
    cache: Arc<DashMap<String, SwhRelease>>,
}

impl<L: SwhReleaseLookup> CachingSwhReleaseLookup<L> {
    /// Creates a new caching lookup wrapping the given inner lookup
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<L: SwhReleaseLookup> SwhReleaseLookup for CachingSwhReleaseLookup<L> {
    async fn fetch_release(&self, release_id: &str) -> Result<SwhRelease> {
        let key = release_id.to_ascii_lowercase();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let release = self.inner.fetch_release(release_id).await?;
        self.cache.insert(key, release.clone());

        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock lookup that tracks call counts and fails for ids starting with "0"
    struct MockSwhReleaseLookup {
        call_count: AtomicUsize,
    }

    impl MockSwhReleaseLookup {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SwhReleaseLookup for MockSwhReleaseLookup {
        async fn fetch_release(&self, release_id: &str) -> Result<SwhRelease> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if release_id.starts_with('0') {
                anyhow::bail!("not found");
            }
            Ok(SwhRelease {
                id: release_id.to_string(),
                name: None,
                date: None,
                message: None,
                target: format!("rev-of-{}", release_id),
                target_type: "revision".to_string(),
                target_url: None,
            })
        }
    }

    #[tokio::test]
    async fn test_caching_lookup_returns_cached_value() {
        let caching = CachingSwhReleaseLookup::new(MockSwhReleaseLookup::new());

        let first = caching.fetch_release("abc").await.unwrap();
        let second = caching.fetch_release("abc").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(caching.inner.get_call_count(), 1);
        assert_eq!(caching.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_caching_lookup_key_ignores_case() {
        let caching = CachingSwhReleaseLookup::new(MockSwhReleaseLookup::new());

        caching.fetch_release("ABC").await.unwrap();
        caching.fetch_release("abc").await.unwrap();
        assert_eq!(caching.inner.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_not_cached() {
        let caching = CachingSwhReleaseLookup::new(MockSwhReleaseLookup::new());

        assert!(caching.fetch_release("0bad").await.is_err());
        assert!(caching.fetch_release("0bad").await.is_err());
        assert_eq!(caching.inner.get_call_count(), 2);
        assert_eq!(caching.cache_size(), 0);
    }
}

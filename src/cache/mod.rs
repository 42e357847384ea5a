//! Cache module for the listing page
//!
//! The first listing page is generated once and then served from memory.
//! After `revalidate_secs` the snapshot is considered stale: it is still
//! served, while a single background task fetches a fresh one. A failed
//! refresh keeps the old snapshot. Requests arriving before the first
//! snapshot exists wait for one shared generation.

use chrono_tz::Tz;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::cms::{CmsError, ContentSource};
use crate::content::Listing;

/// A generated listing and when it was fetched
#[derive(Debug, Clone)]
struct Snapshot {
    listing: Listing,
    generated_at: Instant,
}

/// Revalidating snapshot of the first listing page
pub struct ListingCache {
    source: Arc<dyn ContentSource>,
    revalidate: Duration,
    tz: Tz,
    language: String,
    snapshot: RwLock<Option<Snapshot>>,
    /// Held while the first snapshot is generated
    generating: Mutex<()>,
    /// Set while a background refresh runs
    refreshing: AtomicBool,
}

impl ListingCache {
    pub fn new(
        source: Arc<dyn ContentSource>,
        revalidate: Duration,
        tz: Tz,
        language: &str,
    ) -> Arc<Self> {
        Arc::new(Self {
            source,
            revalidate,
            tz,
            language: language.to_string(),
            snapshot: RwLock::new(None),
            generating: Mutex::new(()),
            refreshing: AtomicBool::new(false),
        })
    }

    /// Get the listing, generating it on first use
    pub async fn get(self: &Arc<Self>) -> Result<Listing, CmsError> {
        let cached = {
            let guard = self.snapshot.read().await;
            guard
                .as_ref()
                .map(|s| (s.listing.clone(), s.generated_at.elapsed() >= self.revalidate))
        };

        match cached {
            Some((listing, stale)) => {
                if stale {
                    self.spawn_refresh();
                }
                Ok(listing)
            }
            None => self.generate().await,
        }
    }

    /// Generate the first snapshot, once for all waiting requests
    async fn generate(&self) -> Result<Listing, CmsError> {
        let _guard = self.generating.lock().await;

        let existing = self
            .snapshot
            .read()
            .await
            .as_ref()
            .map(|s| s.listing.clone());
        if let Some(listing) = existing {
            return Ok(listing);
        }

        self.refresh().await
    }

    /// Fetch the first page now and store it
    pub async fn refresh(&self) -> Result<Listing, CmsError> {
        let response = self.source.query_page(1).await?;
        let listing = Listing::from_response(&response, &self.tz, &self.language);

        *self.snapshot.write().await = Some(Snapshot {
            listing: listing.clone(),
            generated_at: Instant::now(),
        });
        tracing::info!(
            "Generated listing: {} posts, {} pages",
            listing.posts.len(),
            listing.pagination.total
        );

        Ok(listing)
    }

    /// Start a background refresh unless one is already running
    fn spawn_refresh(self: &Arc<Self>) {
        if self.refreshing.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::debug!("Listing is stale, revalidating");
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = cache.refresh().await {
                tracing::warn!("Failed to revalidate listing, serving stale copy: {}", e);
            }
            cache.refreshing.store(false, Ordering::SeqCst);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::memory::MemorySource;

    fn cache(source: Arc<MemorySource>, revalidate: Duration) -> Arc<ListingCache> {
        ListingCache::new(source, revalidate, chrono_tz::UTC, "pt-BR")
    }

    /// Wait for a background refresh to finish
    async fn settle(cache: &ListingCache) {
        for _ in 0..100 {
            if !cache.refreshing.load(Ordering::SeqCst) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("background refresh did not finish");
    }

    /// Call `get` from `count` tasks at once
    async fn get_concurrently(
        cache: &Arc<ListingCache>,
        count: usize,
    ) -> Vec<Result<Listing, CmsError>> {
        let handles: Vec<_> = (0..count)
            .map(|_| {
                let cache = Arc::clone(cache);
                tokio::spawn(async move { cache.get().await })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    #[tokio::test]
    async fn test_first_get_generates() {
        let source = Arc::new(MemorySource::with_posts(3, 2));
        let cache = cache(source.clone(), Duration::from_secs(1800));

        let listing = cache.get().await.unwrap();
        assert_eq!(listing.posts.len(), 2);
        assert_eq!(listing.pagination.total, 2);
        assert_eq!(source.query_count(), 1);
    }

    #[tokio::test]
    async fn test_fresh_snapshot_is_reused() {
        let source = Arc::new(MemorySource::with_posts(3, 2));
        let cache = cache(source.clone(), Duration::from_secs(1800));

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.query_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_snapshot_is_served_and_revalidated() {
        let source = Arc::new(MemorySource::with_posts(3, 2));
        let cache = cache(source.clone(), Duration::ZERO);

        cache.get().await.unwrap();
        let stale = cache.get().await.unwrap();
        assert_eq!(stale.posts.len(), 2);

        for _ in 0..50 {
            if source.query_count() >= 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(source.query_count(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_stale_hits_refresh_once() {
        let source = Arc::new(MemorySource::with_posts(3, 2).with_delay(Duration::from_millis(20)));
        let cache = cache(source.clone(), Duration::ZERO);
        cache.get().await.unwrap();

        let results = get_concurrently(&cache, 10).await;
        assert!(results.iter().all(|r| r.is_ok()));

        settle(&cache).await;
        assert_eq!(source.query_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let source = Arc::new(MemorySource::with_posts(3, 2).failing_after(1));
        let cache = cache(source.clone(), Duration::ZERO);

        let first = cache.get().await.unwrap();
        assert_eq!(first.posts[0].slug, "post-1");

        // Stale: served while the refresh fails in the background
        cache.get().await.unwrap();
        settle(&cache).await;
        assert_eq!(source.query_count(), 2);

        let after = cache.get().await.unwrap();
        assert_eq!(after, first);
    }

    #[tokio::test]
    async fn test_concurrent_first_gets_generate_once() {
        let source = Arc::new(MemorySource::with_posts(3, 2).with_delay(Duration::from_millis(20)));
        let cache = cache(source.clone(), Duration::from_secs(1800));

        let results = get_concurrently(&cache, 10).await;
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(source.query_count(), 1);
    }

    #[tokio::test]
    async fn test_first_get_propagates_errors() {
        let source = Arc::new(MemorySource::failing());
        let cache = cache(source, Duration::from_secs(1800));
        assert!(cache.get().await.is_err());
    }
}

//! Time-bounded response cache keyed by full request URL.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashMap;
use web_time::Instant;

use super::transport::{HttpResponse, Transport, TransportError};

/// PubChem data changes rarely; an hour keeps repeated searches off the
/// upstream service.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    fetched_at: Instant,
    response: HttpResponse,
}

/// Wraps a [`Transport`] and replays responses younger than the TTL.
///
/// Every completed exchange is cached, including non-2xx statuses, so a
/// repeated query inside the window never hits the same endpoint twice.
/// Transport failures are not cached.
pub struct CachedTransport<T> {
    inner: T,
    ttl: Duration,
    entries: Mutex<FxHashMap<String, CacheEntry>>,
}

impl<T: Transport> CachedTransport<T> {
    /// Cache `inner` responses for `ttl`.
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Number of stored entries (fresh or not yet purged).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached response.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, FxHashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, url: &str) -> Option<HttpResponse> {
        let entries = self.lock();
        let entry = entries.get(url)?;
        (entry.fetched_at.elapsed() < self.ttl).then(|| entry.response.clone())
    }

    fn store(&self, url: &str, response: &HttpResponse) {
        let now = Instant::now();
        let ttl = self.ttl;
        let mut entries = self.lock();
        entries.retain(|_, e| now.duration_since(e.fetched_at) < ttl);
        let _ = entries.insert(
            url.to_owned(),
            CacheEntry {
                fetched_at: now,
                response: response.clone(),
            },
        );
    }
}

impl<T: Transport> Transport for CachedTransport<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        if let Some(hit) = self.lookup(url) {
            log::debug!("cache hit: {url}");
            return Ok(hit);
        }
        // The lock is not held across the request; two racing misses for
        // the same URL both go upstream and the later one wins.
        let response = self.inner.get(url)?;
        self.store(url, &response);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Transport for Counting {
        fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TransportError::Request("offline".to_owned()));
            }
            Ok(HttpResponse::ok(url))
        }
    }

    #[test]
    fn repeated_url_hits_cache() {
        let cache = CachedTransport::new(Counting::default(), DEFAULT_TTL);
        let first = cache.get("https://a/1").unwrap();
        let second = cache.get("https://a/1").unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);

        let _ = cache.get("https://a/2").unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn non_success_statuses_are_cached() {
        struct NotFound(AtomicUsize);
        impl Transport for NotFound {
            fn get(&self, _: &str) -> Result<HttpResponse, TransportError> {
                let _ = self.0.fetch_add(1, Ordering::SeqCst);
                Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                })
            }
        }
        let cache = CachedTransport::new(NotFound(AtomicUsize::new(0)), DEFAULT_TTL);
        assert_eq!(cache.get("u").unwrap().status, 404);
        assert_eq!(cache.get("u").unwrap().status, 404);
        assert_eq!(cache.inner().0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn expired_entries_refetch() {
        let cache = CachedTransport::new(Counting::default(), Duration::ZERO);
        let _ = cache.get("u").unwrap();
        let _ = cache.get("u").unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
        // Purged on each insert, so only the latest survives.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn transport_errors_are_not_cached() {
        let cache = CachedTransport::new(
            Counting {
                fail: true,
                ..Counting::default()
            },
            DEFAULT_TTL,
        );
        assert!(cache.get("u").is_err());
        assert!(cache.get("u").is_err());
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }
}

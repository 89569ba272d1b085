//! Response cache abstraction.
//!
//! The fetcher talks to a [`ResponseCache`] injected at construction. The
//! process-wide default is [`MemoryCache`], a TTL-bounded moka cache; cloning it
//! shares the same entries, so one instance can back every request in a server.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

use crate::error::CacheError;

/// Canonical request identity used as the cache key.
///
/// Built from a parsed URL with the fragment stripped, so spelling variants of
/// the same request (host case, default port) share one entry. Keys include
/// the API key path segment, which keeps learners apart.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Canonicalize a request URL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::MalformedKey`] if `raw` is not an absolute
    /// http(s) URL.
    pub fn from_url(raw: &str) -> Result<Self, CacheError> {
        let mut url = reqwest::Url::parse(raw).map_err(|e| CacheError::MalformedKey {
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CacheError::MalformedKey {
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        url.set_fragment(None);
        Ok(Self(url.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for logs: host plus the last two path segments, which
    /// leaves the API key out.
    #[must_use]
    pub fn redacted(&self) -> String {
        let Ok(url) = reqwest::Url::parse(&self.0) else {
            return String::from("<unparseable>");
        };
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let tail = &segments[segments.len().saturating_sub(2)..];
        format!("{}/…/{}", url.host_str().unwrap_or_default(), tail.join("/"))
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", self.redacted())
    }
}

/// Get/set store for decoded upstream payloads.
///
/// Eviction is owned by the implementation; callers never invalidate.
pub trait ResponseCache: Send + Sync {
    fn get(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = Result<Option<Arc<Value>>, CacheError>> + Send;

    fn set(
        &self,
        key: CacheKey,
        value: Arc<Value>,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;
}

/// In-process TTL cache backed by `moka`.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<CacheKey, Arc<Value>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl ResponseCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Arc<Value>>, CacheError> {
        Ok(self.entries.get(key).await)
    }

    async fn set(&self, key: CacheKey, value: Arc<Value>) -> Result<(), CacheError> {
        self.entries.insert(key, value).await;
        Ok(())
    }
}

/// Cache that never stores anything. Used when caching is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Arc<Value>>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: CacheKey, _value: Arc<Value>) -> Result<(), CacheError> {
        Ok(())
    }
}

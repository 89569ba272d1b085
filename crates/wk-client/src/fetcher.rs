//! Get-or-populate fetching in front of the upstream API.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::error::UpstreamError;
use crate::http::Upstream;

/// Wraps an [`Upstream`] with a [`ResponseCache`].
///
/// Sequential fetches of the same URL within the cache TTL reach upstream at
/// most once. Concurrent misses on one key are not deduplicated and may both
/// go upstream. Cache failures never fail a fetch: an unreachable cache is
/// treated as a miss and an uncanonicalizable URL skips the cache entirely.
#[derive(Debug, Clone)]
pub struct CachingFetcher<U, C> {
    upstream: U,
    cache: C,
}

impl<U: Upstream, C: ResponseCache> CachingFetcher<U, C> {
    pub const fn new(upstream: U, cache: C) -> Self {
        Self { upstream, cache }
    }

    /// Return the payload for `url`, from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when the upstream call fails. Nothing is
    /// cached in that case.
    pub async fn fetch(&self, url: &str) -> Result<Arc<Value>, UpstreamError> {
        let key = match CacheKey::from_url(url) {
            Ok(key) => key,
            Err(error) => {
                warn!(%error, "request identity not cacheable, bypassing cache");
                return self.upstream.get_json(url).await.map(Arc::new);
            }
        };

        match self.cache.get(&key).await {
            Ok(Some(value)) => {
                debug!(key = %key.redacted(), cache = "hit", "serving cached response");
                return Ok(value);
            }
            Ok(None) => debug!(key = %key.redacted(), cache = "miss", "fetching upstream"),
            Err(error) => warn!(key = %key.redacted(), %error, "cache lookup failed, fetching upstream"),
        }

        let value = Arc::new(self.upstream.get_json(url).await?);
        debug!(key = %key.redacted(), "caching response");
        if let Err(error) = self.cache.set(key, Arc::clone(&value)).await {
            warn!(%error, "cache store failed, continuing uncached");
        }
        Ok(value)
    }
}

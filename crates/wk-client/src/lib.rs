//! # wk-client
//!
//! Cached HTTP client for the learning-progress API.
//!
//! Layers, bottom-up:
//! - [`Upstream`] / [`HttpUpstream`]: one GET, status checks, JSON decode
//! - [`ResponseCache`] / [`MemoryCache`]: get/set store with TTL eviction
//! - [`CachingFetcher`]: get-or-populate over the two above
//! - [`WaniKaniClient`]: builds request URLs for one learner and implements
//!   [`wk_core::ScheduleSource`]

pub mod cache;
pub mod fetcher;
pub mod http;

mod error;
mod source;
mod wire;

#[cfg(test)]
mod test_support;

pub use cache::{CacheKey, MemoryCache, NoCache, ResponseCache};
pub use error::{CacheError, UpstreamError};
pub use fetcher::CachingFetcher;
pub use http::{HttpUpstream, Upstream};

use wk_core::{ApiKey, ItemCategory};

// ── Client ─────────────────────────────────────────────────────────

/// Client bound to one learner's API key.
///
/// Cheap to build per request: the fetcher's upstream and cache are meant to
/// be clones of process-wide instances.
#[derive(Debug, Clone)]
pub struct WaniKaniClient<U = HttpUpstream, C = MemoryCache> {
    api_key: ApiKey,
    base_url: String,
    fetcher: CachingFetcher<U, C>,
}

impl<U: Upstream, C: ResponseCache> WaniKaniClient<U, C> {
    /// `base_url` is the API root, e.g. `https://www.wanikani.com/api/v1.4`.
    pub fn new(api_key: ApiKey, base_url: &str, fetcher: CachingFetcher<U, C>) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    fn user_url(&self, resource: &str) -> String {
        format!(
            "{}/user/{}/{resource}",
            self.base_url,
            urlencoding::encode(self.api_key.expose())
        )
    }

    fn profile_url(&self) -> String {
        self.user_url("user-information")
    }

    /// Listing URL for `category` at the given levels, e.g. `.../kanji/1,2,3`.
    fn items_url(&self, category: ItemCategory, levels: &[u32]) -> String {
        let levels = levels
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.user_url(&format!("{}/{levels}", category.resource()))
    }
}

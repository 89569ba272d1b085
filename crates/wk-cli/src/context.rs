use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde_json::Value;
use wk_calendar::{CalendarOptions, CalendarService};
use wk_client::{
    CacheError, CacheKey, CachingFetcher, HttpUpstream, MemoryCache, NoCache, ResponseCache,
    WaniKaniClient,
};
use wk_config::WkConfig;
use wk_core::ApiKey;

/// Response cache selected by `cache.enabled`.
#[derive(Debug, Clone)]
pub enum FeedCache {
    Memory(MemoryCache),
    Disabled(NoCache),
}

impl ResponseCache for FeedCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Arc<Value>>, CacheError> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Disabled(cache) => cache.get(key).await,
        }
    }

    async fn set(&self, key: CacheKey, value: Arc<Value>) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.set(key, value).await,
            Self::Disabled(cache) => cache.set(key, value).await,
        }
    }
}

pub type Service = CalendarService<WaniKaniClient<HttpUpstream, FeedCache>>;

/// Process-wide state: validated config plus the HTTP client and response
/// cache shared by every learner.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: WkConfig,
    upstream: HttpUpstream,
    cache: FeedCache,
    options: CalendarOptions,
}

impl AppContext {
    /// # Errors
    ///
    /// Fails when the config is invalid.
    pub fn init(config: WkConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid configuration")?;
        let options = CalendarOptions::from_config(&config.calendar)?;

        let upstream = HttpUpstream::new(
            &config.upstream.user_agent,
            Duration::from_secs(config.upstream.timeout_secs),
        );
        let cache = if config.cache.enabled {
            FeedCache::Memory(MemoryCache::new(
                Duration::from_secs(config.cache.ttl_secs),
                config.cache.max_entries,
            ))
        } else {
            tracing::debug!("response cache disabled");
            FeedCache::Disabled(NoCache)
        };

        Ok(Self {
            config,
            upstream,
            cache,
            options,
        })
    }

    /// Calendar service bound to one learner, sharing this context's client
    /// and cache.
    #[must_use]
    pub fn service(&self, api_key: ApiKey) -> Service {
        let fetcher = CachingFetcher::new(self.upstream.clone(), self.cache.clone());
        let client = WaniKaniClient::new(api_key, self.config.upstream.base_url(), fetcher);
        CalendarService::new(client, self.options.clone())
    }
}

//! Response cache configuration.

use serde::{Deserialize, Serialize};

const fn default_enabled() -> bool {
    true
}

/// Default time-to-live, in seconds.
const fn default_ttl_secs() -> u64 {
    300
}

const fn default_max_entries() -> u64 {
    1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// When false, every fetch goes upstream.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How long a cached upstream response stays valid.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Upper bound on cached responses.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl CacheConfig {
    /// Longest accepted time-to-live: one day.
    pub const MAX_TTL_SECS: u64 = 24 * 60 * 60;
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

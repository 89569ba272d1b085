//! # wk-config
//!
//! Layered configuration loading for wkcal using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WKCAL_*` prefix, `__` as separator)
//! 2. Project-level `.wkcal/config.toml`
//! 3. User-level `~/.config/wkcal/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WKCAL_CACHE__TTL_SECS` -> `cache.ttl_secs`,
//! `WKCAL_CALENDAR__LOCALE` -> `calendar.locale`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use wk_config::WkConfig;
//!
//! let config = WkConfig::load().expect("config");
//! config.validate().expect("valid config");
//! println!("cache ttl: {}s", config.cache.ttl_secs);
//! ```

mod cache;
mod calendar;
mod error;
mod server;
mod upstream;

pub use cache::CacheConfig;
pub use calendar::CalendarConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WkConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl WkConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; callers that want it load it into the process
    /// environment first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".wkcal/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("WKCAL_").split("__"))
    }

    /// Check cross-field constraints that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.base_url().is_empty() {
            return Err(ConfigError::invalid("upstream.base_url", "must not be empty"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::invalid("upstream.timeout_secs", "must be positive"));
        }
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(ConfigError::invalid(
                "cache.ttl_secs",
                "must be positive while the cache is enabled",
            ));
        }
        if self.cache.enabled && self.cache.ttl_secs > CacheConfig::MAX_TTL_SECS {
            return Err(ConfigError::invalid(
                "cache.ttl_secs",
                format!("must be at most {} seconds", CacheConfig::MAX_TTL_SECS),
            ));
        }
        if self.calendar.blocker_stages.is_empty() {
            return Err(ConfigError::invalid(
                "calendar.blocker_stages",
                "at least one stage is required",
            ));
        }
        self.calendar.zone()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wkcal").join("config.toml"))
    }
}

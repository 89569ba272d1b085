//! Calendar generation settings.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use wk_core::{SrsStage, SummaryLocale};

use crate::error::ConfigError;

/// Largest accepted offset magnitude, in minutes (just under a day).
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

fn default_blocker_stages() -> Vec<SrsStage> {
    vec![SrsStage::Apprentice]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Fixed UTC offset used to turn review instants into calendar dates.
    /// `0` means dates are UTC dates.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Language of event summaries.
    #[serde(default)]
    pub locale: SummaryLocale,

    /// Stages that still block the next level.
    #[serde(default = "default_blocker_stages")]
    pub blocker_stages: Vec<SrsStage>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            locale: SummaryLocale::default(),
            blocker_stages: default_blocker_stages(),
        }
    }
}

impl CalendarConfig {
    /// The rollup zone as a chrono offset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the offset is a day or more.
    pub fn zone(&self) -> Result<FixedOffset, ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::invalid(
                "calendar.utc_offset_minutes",
                format!("must be within ±{MAX_OFFSET_MINUTES}"),
            ));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::invalid("calendar.utc_offset_minutes", "offset out of range")
        })
    }
}

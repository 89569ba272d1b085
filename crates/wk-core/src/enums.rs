//! Item categories, SRS stages, and summary locales.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which matches the stage names the upstream API reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ItemCategory
// ---------------------------------------------------------------------------

/// Curriculum item category.
///
/// Radicals and kanji gate level advancement. Vocabulary only shows up in the
/// upcoming-review schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Radical,
    Kanji,
    Vocabulary,
}

impl ItemCategory {
    /// Categories whose progress blocks the next level.
    pub const BLOCKING: [Self; 2] = [Self::Radical, Self::Kanji];

    /// Every category, in upstream listing order.
    pub const ALL: [Self; 3] = [Self::Radical, Self::Kanji, Self::Vocabulary];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radical => "radical",
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
        }
    }

    /// Path segment used by the upstream item listing endpoints.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Radical => "radicals",
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SrsStage
// ---------------------------------------------------------------------------

/// Mastery stage of an item, ordered from least to most learned.
///
/// ```text
/// locked → apprentice → guru → master → enlighten → burned
/// ```
///
/// `Locked` is not an upstream stage name; it stands for items the learner
/// has not unlocked yet (no per-user progress exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SrsStage {
    Locked,
    Apprentice,
    Guru,
    Master,
    Enlighten,
    Burned,
}

impl SrsStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Apprentice => "apprentice",
            Self::Guru => "guru",
            Self::Master => "master",
            Self::Enlighten => "enlighten",
            Self::Burned => "burned",
        }
    }

    /// Whether an item at this stage counts towards passing its level.
    #[must_use]
    pub fn is_passed(self) -> bool {
        self >= Self::Guru
    }
}

impl fmt::Display for SrsStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SrsStage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locked" => Ok(Self::Locked),
            "apprentice" => Ok(Self::Apprentice),
            "guru" => Ok(Self::Guru),
            "master" => Ok(Self::Master),
            "enlighten" | "enlightened" => Ok(Self::Enlighten),
            "burned" => Ok(Self::Burned),
            other => Err(CoreError::UnknownStage(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SummaryLocale
// ---------------------------------------------------------------------------

/// Language used when rendering event summaries to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLocale {
    #[default]
    Ja,
    En,
}

impl SummaryLocale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

impl fmt::Display for SummaryLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

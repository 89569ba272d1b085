//! Calendar event records and their structured summaries.
//!
//! Summaries stay structured here. Turning them into text for a given
//! [`SummaryLocale`](crate::SummaryLocale) happens at the serialization
//! boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::counts::CategoryCount;

/// Start or end of an event: an exact instant or a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum EventTime {
    Instant(DateTime<Utc>),
    Date(NaiveDate),
}

/// What a blocker event reports, selected from the bucket's category counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BlockerSummary {
    Both { radicals: usize, kanji: usize },
    Radicals { radicals: usize },
    Kanji { kanji: usize },
}

impl BlockerSummary {
    /// Pick the summary variant for a bucket.
    ///
    /// The checks run in order: both categories present, radicals only,
    /// then kanji. Callers skip empty buckets before getting here.
    #[must_use]
    pub const fn from_counts(counts: &CategoryCount) -> Self {
        if counts.radicals > 0 && counts.kanji > 0 {
            Self::Both {
                radicals: counts.radicals,
                kanji: counts.kanji,
            }
        } else if counts.radicals > 0 {
            Self::Radicals {
                radicals: counts.radicals,
            }
        } else {
            Self::Kanji { kanji: counts.kanji }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum EventSummary {
    Blockers(BlockerSummary),
    Reviews { count: usize },
}

/// One calendar entry, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Stable identifier derived from the bucket key, so calendar clients
    /// update an existing entry instead of inserting a duplicate.
    pub uid: String,
    pub summary: EventSummary,
    pub start: EventTime,
    pub end: Option<EventTime>,
}

//! Entry operations over a [`ScheduleSource`].

use chrono::{DateTime, FixedOffset, Offset, Utc};
use wk_config::{CalendarConfig, ConfigError};
use wk_core::{CalendarEvent, ItemCategory, ScheduleSource, SrsStage, SummaryLocale};

use crate::aggregate::{build_blocker_queue, build_review_queue};
use crate::ics::{CalendarMeta, write_calendar};
use crate::progress::LevelProgress;
use crate::project::{project_blockers, project_reviews};

/// Per-deployment calendar settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarOptions {
    pub zone: FixedOffset,
    pub locale: SummaryLocale,
    pub blocker_stages: Vec<SrsStage>,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            zone: Utc.fix(),
            locale: SummaryLocale::default(),
            blocker_stages: vec![SrsStage::Apprentice],
        }
    }
}

impl CalendarOptions {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the configured offset is out
    /// of range.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            zone: config.zone()?,
            locale: config.locale,
            blocker_stages: config.blocker_stages.clone(),
        })
    }
}

/// Builds both calendar feeds and the progress dashboard for one learner.
///
/// Every call is a fresh pass over the source. Source errors come back
/// unmodified and no partial output is produced.
#[derive(Debug, Clone)]
pub struct CalendarService<S> {
    source: S,
    options: CalendarOptions,
}

impl<S: ScheduleSource> CalendarService<S> {
    pub const fn new(source: S, options: CalendarOptions) -> Self {
        Self { source, options }
    }

    /// Blocker events for the learner's current level.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the profile or listings can't be fetched.
    pub async fn blocker_events(&self) -> Result<Vec<CalendarEvent>, S::Error> {
        let profile = self.source.profile().await?;
        let queue = build_blocker_queue(
            &self.source,
            profile.level,
            &ItemCategory::BLOCKING,
            &self.options.blocker_stages,
        )
        .await?;
        let events = project_blockers(&queue);
        tracing::info!(
            level = profile.level,
            items = queue.item_count(),
            events = events.len(),
            "built blocker events"
        );
        Ok(events)
    }

    /// One all-day event per date with reviews due.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the profile or listings can't be fetched.
    pub async fn review_events(&self) -> Result<Vec<CalendarEvent>, S::Error> {
        let buckets = build_review_queue(&self.source, self.options.zone).await?;
        let events = project_reviews(&buckets);
        tracing::info!(
            items = buckets.item_count(),
            events = events.len(),
            "built review events"
        );
        Ok(events)
    }

    /// The blocker feed as iCalendar bytes.
    ///
    /// # Errors
    ///
    /// See [`Self::blocker_events`].
    pub async fn blocker_calendar(&self) -> Result<Vec<u8>, S::Error> {
        self.blocker_calendar_at(Utc::now()).await
    }

    /// Like [`Self::blocker_calendar`] with a fixed `DTSTAMP`.
    ///
    /// # Errors
    ///
    /// See [`Self::blocker_events`].
    pub async fn blocker_calendar_at(&self, stamp: DateTime<Utc>) -> Result<Vec<u8>, S::Error> {
        let events = self.blocker_events().await?;
        Ok(write_calendar(
            &CalendarMeta::blockers(),
            &events,
            self.options.locale,
            stamp,
        ))
    }

    /// The review feed as iCalendar bytes.
    ///
    /// # Errors
    ///
    /// See [`Self::review_events`].
    pub async fn review_calendar(&self) -> Result<Vec<u8>, S::Error> {
        self.review_calendar_at(Utc::now()).await
    }

    /// Like [`Self::review_calendar`] with a fixed `DTSTAMP`.
    ///
    /// # Errors
    ///
    /// See [`Self::review_events`].
    pub async fn review_calendar_at(&self, stamp: DateTime<Utc>) -> Result<Vec<u8>, S::Error> {
        let events = self.review_events().await?;
        Ok(write_calendar(
            &CalendarMeta::reviews(),
            &events,
            self.options.locale,
            stamp,
        ))
    }

    /// Radical and kanji progress at the learner's current level.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the profile or listings can't be fetched.
    pub async fn level_progress(&self) -> Result<LevelProgress, S::Error> {
        let profile = self.source.profile().await?;
        let items = self
            .source
            .level_items(profile.level, &ItemCategory::BLOCKING)
            .await?;
        tracing::debug!(level = profile.level, items = items.len(), "fetched level items");
        Ok(LevelProgress::from_items(profile, items))
    }
}

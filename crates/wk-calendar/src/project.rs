//! Projection of aggregated buckets onto calendar events.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use wk_core::{
    BlockerSummary, CalendarEvent, CategoryCount, DateBuckets, EventSummary, EventTime,
    ScheduleQueue,
};

/// Stable id for the blocker event at `at`.
#[must_use]
pub fn blocker_uid(at: DateTime<Utc>) -> String {
    format!("blocker-{}", at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Stable id for the review event on `date`.
#[must_use]
pub fn review_uid(date: NaiveDate) -> String {
    format!("reviews-{}", date.format("%Y-%m-%d"))
}

/// One zero-length event per non-empty bucket, in ascending time order.
#[must_use]
pub fn project_blockers(queue: &ScheduleQueue) -> Vec<CalendarEvent> {
    queue
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(at, items)| {
            let counts = CategoryCount::tally(items);
            CalendarEvent {
                uid: blocker_uid(*at),
                summary: EventSummary::Blockers(BlockerSummary::from_counts(&counts)),
                start: EventTime::Instant(*at),
                end: Some(EventTime::Instant(*at)),
            }
        })
        .collect()
}

/// One all-day event per non-empty date, in ascending date order.
#[must_use]
pub fn project_reviews(buckets: &DateBuckets) -> Vec<CalendarEvent> {
    buckets
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(date, items)| CalendarEvent {
            uid: review_uid(*date),
            summary: EventSummary::Reviews { count: items.len() },
            start: EventTime::Date(*date),
            end: None,
        })
        .collect()
}

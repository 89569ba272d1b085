//! Schedule aggregation: blocker queues and daily review rollups.

use chrono::FixedOffset;
use wk_core::queue::date_in_zone;
use wk_core::{DateBuckets, ItemCategory, ScheduleQueue, ScheduleSource, SrsStage};

/// Items of `categories` at `level` still sitting in one of `stages`,
/// grouped by the instant of their next review. The blocker view passes
/// [`ItemCategory::BLOCKING`].
///
/// Empty buckets are dropped. No blocking items is an empty queue, not an
/// error.
///
/// # Errors
///
/// Returns the source's error unmodified.
pub async fn build_blocker_queue<S: ScheduleSource>(
    source: &S,
    level: u32,
    categories: &[ItemCategory],
    stages: &[SrsStage],
) -> Result<ScheduleQueue, S::Error> {
    let queue = source.query_blockers(level, categories, stages).await?;
    Ok(queue.without_empty())
}

/// Every upcoming review, rolled up to calendar dates in `zone`.
///
/// # Errors
///
/// Returns the source's error unmodified.
pub async fn build_review_queue<S: ScheduleSource>(
    source: &S,
    zone: FixedOffset,
) -> Result<DateBuckets, S::Error> {
    let queue = source.upcoming_reviews().await?;
    Ok(roll_up(queue, zone))
}

/// Re-key a queue by calendar date in `zone`.
///
/// Buckets are visited in ascending time order, so items that land on the
/// same date keep their chronological order. Nothing is dropped or
/// duplicated.
#[must_use]
pub fn roll_up(queue: ScheduleQueue, zone: FixedOffset) -> DateBuckets {
    let mut buckets = DateBuckets::new();
    for (at, items) in queue {
        buckets.append(date_in_zone(at, zone), items);
    }
    buckets
}

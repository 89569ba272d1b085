//! Timestamp-keyed schedule queues and their date-keyed rollups.
//!
//! Both containers are backed by `BTreeMap`, so iteration is always in
//! ascending chronological order. Item order inside a bucket follows insertion
//! order and carries no meaning.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::entities::ReviewItem;

// ---------------------------------------------------------------------------
// ScheduleQueue
// ---------------------------------------------------------------------------

/// Items grouped by the exact instant they become available for review.
///
/// A queue built from raw source data may hold empty buckets; consumers are
/// expected to skip them (see [`ScheduleQueue::without_empty`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleQueue {
    buckets: BTreeMap<DateTime<Utc>, Vec<ReviewItem>>,
}

impl ScheduleQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item to the bucket at `at`, creating it if needed.
    pub fn push(&mut self, at: DateTime<Utc>, item: ReviewItem) {
        self.buckets.entry(at).or_default().push(item);
    }

    /// Append items to the bucket at `at`. Creates the bucket even when
    /// `items` is empty, mirroring what an upstream source may hand back.
    pub fn extend_bucket(&mut self, at: DateTime<Utc>, items: impl IntoIterator<Item = ReviewItem>) {
        self.buckets.entry(at).or_default().extend(items);
    }

    /// Buckets in ascending timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (&DateTime<Utc>, &[ReviewItem])> {
        self.buckets.iter().map(|(at, items)| (at, items.as_slice()))
    }

    #[must_use]
    pub fn get(&self, at: &DateTime<Utc>) -> Option<&[ReviewItem]> {
        self.buckets.get(at).map(Vec::as_slice)
    }

    /// Number of buckets, empty ones included.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of items across every bucket.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when the queue holds no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Drop buckets that hold no items.
    #[must_use]
    pub fn without_empty(mut self) -> Self {
        self.buckets.retain(|_, items| !items.is_empty());
        self
    }
}

impl IntoIterator for ScheduleQueue {
    type Item = (DateTime<Utc>, Vec<ReviewItem>);
    type IntoIter = std::collections::btree_map::IntoIter<DateTime<Utc>, Vec<ReviewItem>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

// ---------------------------------------------------------------------------
// DateBuckets
// ---------------------------------------------------------------------------

/// Items grouped by calendar date in a fixed zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBuckets {
    days: BTreeMap<NaiveDate, Vec<ReviewItem>>,
}

impl DateBuckets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append items to the bucket for `date`, after whatever is already there.
    pub fn append(&mut self, date: NaiveDate, items: impl IntoIterator<Item = ReviewItem>) {
        self.days.entry(date).or_default().extend(items);
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &[ReviewItem])> {
        self.days.iter().map(|(date, items)| (date, items.as_slice()))
    }

    #[must_use]
    pub fn get(&self, date: &NaiveDate) -> Option<&[ReviewItem]> {
        self.days.get(date).map(Vec::as_slice)
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Re-key every date as the instant of its local midnight in `zone`.
    ///
    /// Rolling the result up again in the same zone reproduces `self`.
    #[must_use]
    pub fn to_queue(&self, zone: FixedOffset) -> ScheduleQueue {
        let mut queue = ScheduleQueue::new();
        for (date, items) in &self.days {
            queue.extend_bucket(local_midnight(*date, zone), items.iter().cloned());
        }
        queue
    }
}

impl IntoIterator for DateBuckets {
    type Item = (NaiveDate, Vec<ReviewItem>);
    type IntoIter = std::collections::btree_map::IntoIter<NaiveDate, Vec<ReviewItem>>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}

/// Calendar date of `at` as seen from `zone`.
#[must_use]
pub fn date_in_zone(at: DateTime<Utc>, zone: FixedOffset) -> NaiveDate {
    at.with_timezone(&zone).date_naive()
}

/// UTC instant of midnight at the start of `date` in `zone`.
#[must_use]
pub fn local_midnight(date: NaiveDate, zone: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    (local - TimeDelta::seconds(i64::from(zone.local_minus_utc()))).and_utc()
}

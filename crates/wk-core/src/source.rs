//! The schedule source seam.
//!
//! Everything that talks to the learning-progress service sits behind
//! [`ScheduleSource`]. The calendar engine only ever sees this trait, which
//! keeps it testable with in-memory fakes.

use std::future::Future;

use crate::entities::{Profile, ReviewItem};
use crate::enums::{ItemCategory, SrsStage};
use crate::queue::ScheduleQueue;

/// Read-only access to a learner's review schedule.
///
/// Implementations are bound to one learner (one API key) at construction.
pub trait ScheduleSource: Send + Sync {
    /// Error surfaced to callers unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Learner profile, including the current level.
    fn profile(&self) -> impl Future<Output = Result<Profile, Self::Error>> + Send;

    /// Items at `level` in one of `categories` whose stage is in `stages`,
    /// keyed by the instant they next become available for review.
    fn query_blockers(
        &self,
        level: u32,
        categories: &[ItemCategory],
        stages: &[SrsStage],
    ) -> impl Future<Output = Result<ScheduleQueue, Self::Error>> + Send;

    /// Every upcoming review across all levels and categories, keyed by the
    /// exact instant it becomes available.
    fn upcoming_reviews(&self) -> impl Future<Output = Result<ScheduleQueue, Self::Error>> + Send;

    /// All items at `level` in `categories`, locked ones included.
    fn level_items(
        &self,
        level: u32,
        categories: &[ItemCategory],
    ) -> impl Future<Output = Result<Vec<ReviewItem>, Self::Error>> + Send;
}

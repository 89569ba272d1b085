//! # wk-calendar
//!
//! Turns a learner's review schedule into calendar feeds.
//!
//! Pipeline, per request:
//! 1. [`aggregate`]: pull queues from a [`wk_core::ScheduleSource`], prune
//!    empty buckets, roll review instants up to dates
//! 2. [`project`]: one [`wk_core::CalendarEvent`] per non-empty bucket, with
//!    stable ids and structured summaries
//! 3. [`ics`]: render events to RFC 5545 bytes, localizing summaries via
//!    [`summary`]
//!
//! [`CalendarService`] wires the steps together for the two feeds, and
//! [`progress`] builds the current-level dashboard from the same source.

pub mod aggregate;
pub mod ics;
pub mod progress;
pub mod project;
pub mod service;
pub mod summary;

pub use ics::{CONTENT_TYPE, CalendarMeta};
pub use progress::{CategoryProgress, LevelProgress};
pub use service::{CalendarOptions, CalendarService};

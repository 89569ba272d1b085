//! # wk-core
//!
//! Core types, schedule queues, and error types for wkcal.
//!
//! This crate provides the foundational types shared across all wkcal crates:
//! - Review items and learner profiles fetched from the upstream source
//! - Item category and SRS stage enums
//! - Timestamp-keyed schedule queues and date-keyed rollup buckets
//! - Per-bucket category counts and structured event summaries
//! - Calendar event records handed to the serializer
//! - The [`ScheduleSource`] seam every upstream implementation plugs into
//! - Cross-cutting error types

pub mod counts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod event;
pub mod queue;
pub mod source;

pub use counts::CategoryCount;
pub use entities::{ApiKey, Profile, ReviewItem};
pub use enums::{ItemCategory, SrsStage, SummaryLocale};
pub use errors::CoreError;
pub use event::{BlockerSummary, CalendarEvent, EventSummary, EventTime};
pub use queue::{DateBuckets, ScheduleQueue};
pub use source::ScheduleSource;

//! End-to-end runs of the calendar pipeline: an in-memory source for the
//! engine itself, and the real client over a canned upstream.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wk_calendar::aggregate::{build_blocker_queue, build_review_queue, roll_up};
use wk_calendar::{CalendarOptions, CalendarService};
use wk_client::{CachingFetcher, MemoryCache, Upstream, UpstreamError, WaniKaniClient};
use wk_core::{
    ApiKey, BlockerSummary, CategoryCount, EventSummary, EventTime, ItemCategory, Profile,
    ReviewItem, ScheduleQueue, ScheduleSource, SrsStage, SummaryLocale,
};

// ── In-memory source ───────────────────────────────────────────────

#[derive(Default)]
struct FakeSource {
    level: u32,
    blockers: ScheduleQueue,
    reviews: ScheduleQueue,
    items: Vec<ReviewItem>,
    fail_blockers: bool,
}

fn boom() -> UpstreamError {
    UpstreamError::Api {
        status: 500,
        message: "upstream exploded".into(),
    }
}

impl ScheduleSource for FakeSource {
    type Error = UpstreamError;

    async fn profile(&self) -> Result<Profile, UpstreamError> {
        Ok(Profile {
            username: "learner".into(),
            level: self.level,
        })
    }

    async fn query_blockers(
        &self,
        level: u32,
        categories: &[ItemCategory],
        stages: &[SrsStage],
    ) -> Result<ScheduleQueue, UpstreamError> {
        if self.fail_blockers {
            return Err(boom());
        }
        assert_eq!(level, self.level);
        let mut queue = ScheduleQueue::new();
        for (at, items) in self.blockers.iter() {
            queue.extend_bucket(
                *at,
                items
                    .iter()
                    .filter(|i| categories.contains(&i.category) && stages.contains(&i.stage))
                    .cloned(),
            );
        }
        Ok(queue)
    }

    async fn upcoming_reviews(&self) -> Result<ScheduleQueue, UpstreamError> {
        Ok(self.reviews.clone())
    }

    async fn level_items(
        &self,
        _level: u32,
        categories: &[ItemCategory],
    ) -> Result<Vec<ReviewItem>, UpstreamError> {
        Ok(self
            .items
            .iter()
            .filter(|i| categories.contains(&i.category))
            .cloned()
            .collect())
    }
}

fn t1() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn t2() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap()
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn apprentice(category: ItemCategory) -> ReviewItem {
    ReviewItem::bare(category, SrsStage::Apprentice)
}

fn named(name: &str) -> ReviewItem {
    ReviewItem {
        meaning: name.into(),
        ..ReviewItem::bare(ItemCategory::Vocabulary, SrsStage::Guru)
    }
}

fn service(source: FakeSource) -> CalendarService<FakeSource> {
    CalendarService::new(source, CalendarOptions::default())
}

// ── Scenarios ──────────────────────────────────────────────────────

#[tokio::test]
async fn mixed_bucket_becomes_one_blocker_event() {
    let mut blockers = ScheduleQueue::new();
    blockers.push(t1(), apprentice(ItemCategory::Radical));
    blockers.push(t1(), apprentice(ItemCategory::Radical));
    blockers.push(t1(), apprentice(ItemCategory::Kanji));
    let service = service(FakeSource {
        level: 5,
        blockers,
        ..FakeSource::default()
    });

    let events = service.blocker_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].uid, "blocker-2024-01-01T09:00:00Z");
    assert_eq!(
        events[0].summary,
        EventSummary::Blockers(BlockerSummary::Both {
            radicals: 2,
            kanji: 1
        })
    );
    assert_eq!(events[0].start, EventTime::Instant(t1()));
    assert_eq!(events[0].end, Some(EventTime::Instant(t1())));

    let ics = String::from_utf8(service.blocker_calendar().await.unwrap()).unwrap();
    assert!(ics.contains("SUMMARY:部首: 2 漢字: 1\r\n"));
}

#[tokio::test]
async fn no_blockers_is_an_empty_calendar() {
    let service = service(FakeSource {
        level: 5,
        ..FakeSource::default()
    });
    assert!(service.blocker_events().await.unwrap().is_empty());

    let ics = String::from_utf8(service.blocker_calendar().await.unwrap()).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(!ics.contains("BEGIN:VEVENT"));
}

#[tokio::test]
async fn same_day_reviews_roll_up_to_one_event() {
    let mut reviews = ScheduleQueue::new();
    reviews.push(t1(), named("A"));
    reviews.push(t2(), named("B"));
    reviews.push(t2(), named("C"));
    let source = FakeSource {
        level: 5,
        reviews,
        ..FakeSource::default()
    };

    let buckets = build_review_queue(&source, utc()).await.unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let names: Vec<_> = buckets
        .get(&day)
        .unwrap()
        .iter()
        .map(|i| i.meaning.as_str())
        .collect();
    assert_eq!(buckets.day_count(), 1);
    assert_eq!(names, vec!["A", "B", "C"]);

    let events = service(source).review_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].uid, "reviews-2024-01-01");
    assert_eq!(events[0].summary, EventSummary::Reviews { count: 3 });
    assert_eq!(events[0].start, EventTime::Date(day));
}

#[tokio::test]
async fn source_failure_yields_no_events() {
    let source = FakeSource {
        level: 5,
        fail_blockers: true,
        ..FakeSource::default()
    };
    let err = build_blocker_queue(&source, 5, &ItemCategory::BLOCKING, &[SrsStage::Apprentice])
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Api { status: 500, .. }));

    let err = service(source).blocker_calendar().await.unwrap_err();
    assert!(matches!(err, UpstreamError::Api { status: 500, .. }));
}

// ── Properties ─────────────────────────────────────────────────────

fn spread_queue() -> ScheduleQueue {
    let mut queue = ScheduleQueue::new();
    for (i, hour) in [0_i64, 3, 9, 15, 23, 30, 47, 48, 71].into_iter().enumerate() {
        let at = t1() + chrono::TimeDelta::hours(hour);
        for n in 0..=(i % 3) {
            queue.push(at, named(&format!("{hour}-{n}")));
        }
    }
    queue.extend_bucket(t1() + chrono::TimeDelta::hours(100), Vec::new());
    queue
}

fn sorted_meanings<'a>(items: impl Iterator<Item = &'a ReviewItem>) -> Vec<String> {
    let mut names: Vec<_> = items.map(|i| i.meaning.clone()).collect();
    names.sort();
    names
}

#[test]
fn rollup_is_lossless() {
    let queue = spread_queue();
    for offset_hours in [-11, 0, 9] {
        let zone = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let buckets = roll_up(queue.clone(), zone);
        assert_eq!(buckets.item_count(), queue.item_count());
        assert_eq!(
            sorted_meanings(buckets.iter().flat_map(|(_, items)| items.iter())),
            sorted_meanings(queue.iter().flat_map(|(_, items)| items.iter())),
        );
    }
}

#[test]
fn rollup_is_idempotent() {
    for offset_hours in [-5, 0, 9] {
        let zone = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let once = roll_up(spread_queue(), zone);
        let twice = roll_up(once.to_queue(zone), zone);
        assert_eq!(once, twice);
    }
}

#[tokio::test]
async fn regenerated_events_keep_their_ids() {
    let mut blockers = ScheduleQueue::new();
    blockers.push(t1(), apprentice(ItemCategory::Kanji));
    blockers.push(t2(), apprentice(ItemCategory::Radical));
    let service = service(FakeSource {
        level: 5,
        blockers,
        reviews: spread_queue(),
        ..FakeSource::default()
    });

    let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        service.blocker_calendar_at(stamp).await.unwrap(),
        service.blocker_calendar_at(stamp).await.unwrap()
    );
    let first: Vec<_> = service.review_events().await.unwrap();
    let second: Vec<_> = service.review_events().await.unwrap();
    assert_eq!(first, second);
    assert!(first.iter().all(|e| e.uid.starts_with("reviews-")));
}

#[test]
fn category_counts_cover_every_item() {
    let queue = spread_queue();
    for (_, items) in queue.iter() {
        assert_eq!(CategoryCount::tally(items).total(), items.len());
    }
}

#[tokio::test]
async fn empty_buckets_never_become_events() {
    let mut blockers = ScheduleQueue::new();
    // guru items are filtered out, leaving an empty bucket behind
    blockers.push(t1(), ReviewItem::bare(ItemCategory::Kanji, SrsStage::Guru));
    blockers.push(t2(), apprentice(ItemCategory::Kanji));
    let service = service(FakeSource {
        level: 5,
        blockers,
        reviews: spread_queue(),
        ..FakeSource::default()
    });

    let blocker_events = service.blocker_events().await.unwrap();
    assert_eq!(blocker_events.len(), 1);
    assert_eq!(blocker_events[0].start, EventTime::Instant(t2()));

    let review_events = service.review_events().await.unwrap();
    assert!(review_events.iter().all(|e| match e.summary {
        EventSummary::Reviews { count } => count > 0,
        EventSummary::Blockers(_) => false,
    }));
}

#[tokio::test]
async fn english_locale_and_zone_come_from_options() {
    let mut reviews = ScheduleQueue::new();
    reviews.push(t2(), named("late"));
    let options = CalendarOptions {
        zone: FixedOffset::east_opt(9 * 3600).unwrap(),
        locale: SummaryLocale::En,
        ..CalendarOptions::default()
    };
    let service = CalendarService::new(
        FakeSource {
            level: 1,
            reviews,
            ..FakeSource::default()
        },
        options,
    );

    let ics = String::from_utf8(service.review_calendar().await.unwrap()).unwrap();
    assert!(ics.contains("SUMMARY:1 review\r\n"));
    assert!(ics.contains("DTSTART;VALUE=DATE:20240102\r\n"));
}

#[tokio::test]
async fn progress_reports_current_level() {
    let items = vec![
        ReviewItem::bare(ItemCategory::Radical, SrsStage::Guru),
        ReviewItem::bare(ItemCategory::Kanji, SrsStage::Apprentice),
        ReviewItem::bare(ItemCategory::Kanji, SrsStage::Master),
        ReviewItem::bare(ItemCategory::Vocabulary, SrsStage::Burned),
    ];
    let progress = service(FakeSource {
        level: 7,
        items,
        ..FakeSource::default()
    })
    .level_progress()
    .await
    .unwrap();

    assert_eq!(progress.level, 7);
    assert_eq!(progress.radicals.passed, 1);
    assert_eq!(progress.kanji.total, 2);
    assert_eq!(progress.kanji.goal, 2);
    assert_eq!(progress.kanji.remaining, 1);
}

// ── Real client over a canned upstream ─────────────────────────────

#[derive(Clone, Default)]
struct CannedUpstream {
    bodies: Arc<HashMap<String, Value>>,
    calls: Arc<AtomicUsize>,
}

impl Upstream for CannedUpstream {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.bodies.get(url).cloned().ok_or(UpstreamError::Api {
            status: 404,
            message: url.to_string(),
        })?;
        wk_client::http::check_body(body)
    }
}

const BASE: &str = "https://api.test/v1.4";

fn canned(bodies: Vec<(&str, Value)>) -> CannedUpstream {
    CannedUpstream {
        bodies: Arc::new(
            bodies
                .into_iter()
                .map(|(path, body)| (format!("{BASE}/user/k/{path}"), body))
                .collect(),
        ),
        calls: Arc::default(),
    }
}

fn client(upstream: CannedUpstream) -> WaniKaniClient<CannedUpstream, MemoryCache> {
    WaniKaniClient::new(
        ApiKey::parse("k").unwrap(),
        BASE,
        CachingFetcher::new(upstream, MemoryCache::new(Duration::from_secs(300), 16)),
    )
}

fn wire_item(srs: &str, at: DateTime<Utc>) -> Value {
    json!({
        "character": "x", "meaning": "x", "level": 3,
        "user_specific": {"srs": srs, "srs_numeric": 1, "available_date": at.timestamp()}
    })
}

#[tokio::test]
async fn client_backed_blocker_calendar() {
    let upstream = canned(vec![
        ("user-information", json!({"user_information": {"username": "u", "level": 3}})),
        (
            "radicals/3",
            json!({"requested_information": [wire_item("apprentice", t1()), wire_item("apprentice", t1())]}),
        ),
        (
            "kanji/3",
            json!({"requested_information": [wire_item("apprentice", t1()), wire_item("guru", t2())]}),
        ),
    ]);
    let service = CalendarService::new(client(upstream.clone()), CalendarOptions::default());

    let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let first = service.blocker_calendar_at(stamp).await.unwrap();
    let text = String::from_utf8(first.clone()).unwrap();
    assert!(text.contains("UID:blocker-2024-01-01T09:00:00Z\r\n"));
    assert!(text.contains("SUMMARY:部首: 2 漢字: 1\r\n"));
    assert_eq!(text.matches("BEGIN:VEVENT").count(), 1);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);

    // second pass is served from cache
    assert_eq!(service.blocker_calendar_at(stamp).await.unwrap(), first);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn client_rejection_surfaces_unmodified() {
    let upstream = canned(vec![
        ("user-information", json!({"user_information": {"username": "u", "level": 3}})),
        (
            "radicals/3",
            json!({"error": {"code": "user_not_found", "message": "no such key"}}),
        ),
    ]);
    let service = CalendarService::new(client(upstream), CalendarOptions::default());
    let err = service.blocker_calendar().await.unwrap_err();
    assert!(matches!(err, UpstreamError::Rejected { ref code, .. } if code == "user_not_found"));
}

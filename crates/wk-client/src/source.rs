//! [`ScheduleSource`] implementation over the v1.4 REST endpoints.

use chrono::{DateTime, Utc};
use tracing::debug;
use wk_core::{ItemCategory, Profile, ReviewItem, ScheduleQueue, ScheduleSource, SrsStage};

use crate::cache::ResponseCache;
use crate::error::UpstreamError;
use crate::http::Upstream;
use crate::wire::{decode_items, decode_profile};
use crate::WaniKaniClient;

impl<U: Upstream, C: ResponseCache> WaniKaniClient<U, C> {
    /// Fetch and map one category's listing at `levels`.
    async fn reviews_for(
        &self,
        category: ItemCategory,
        levels: &[u32],
    ) -> Result<Vec<(ReviewItem, Option<DateTime<Utc>>)>, UpstreamError> {
        let payload = self.fetcher.fetch(&self.items_url(category, levels)).await?;
        decode_items(&payload)?
            .into_iter()
            .map(|item| item.into_review(category))
            .collect()
    }
}

impl<U: Upstream, C: ResponseCache> ScheduleSource for WaniKaniClient<U, C> {
    type Error = UpstreamError;

    async fn profile(&self) -> Result<Profile, UpstreamError> {
        let payload = self.fetcher.fetch(&self.profile_url()).await?;
        decode_profile(&payload)
    }

    async fn query_blockers(
        &self,
        level: u32,
        categories: &[ItemCategory],
        stages: &[SrsStage],
    ) -> Result<ScheduleQueue, UpstreamError> {
        let mut queue = ScheduleQueue::new();
        for &category in categories {
            for (item, next_review) in self.reviews_for(category, &[level]).await? {
                if !stages.contains(&item.stage) {
                    continue;
                }
                if let Some(at) = next_review {
                    queue.push(at, item);
                }
            }
        }
        debug!(level, items = queue.item_count(), "queried blockers");
        Ok(queue)
    }

    async fn upcoming_reviews(&self) -> Result<ScheduleQueue, UpstreamError> {
        let profile = self.profile().await?;
        let levels: Vec<u32> = (1..=profile.level).collect();

        let mut queue = ScheduleQueue::new();
        for category in ItemCategory::ALL {
            for (item, next_review) in self.reviews_for(category, &levels).await? {
                if let Some(at) = next_review {
                    queue.push(at, item);
                }
            }
        }
        debug!(items = queue.item_count(), buckets = queue.bucket_count(), "queried upcoming reviews");
        Ok(queue)
    }

    async fn level_items(
        &self,
        level: u32,
        categories: &[ItemCategory],
    ) -> Result<Vec<ReviewItem>, UpstreamError> {
        let mut items = Vec::new();
        for &category in categories {
            items.extend(
                self.reviews_for(category, &[level])
                    .await?
                    .into_iter()
                    .map(|(item, _)| item),
            );
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::fetcher::CachingFetcher;
    use crate::test_support::FakeUpstream;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wk_core::ApiKey;

    const BASE: &str = "https://api.test/v1.4";
    const T1: i64 = 1_704_099_600; // 2024-01-01T09:00:00Z
    const T2: i64 = 1_704_142_800; // 2024-01-01T21:00:00Z

    fn url(path: &str) -> String {
        format!("{BASE}/user/key1/{path}")
    }

    fn entry(character: &str, srs: &str, at: i64) -> Value {
        json!({
            "character": character, "meaning": character, "level": 1,
            "user_specific": {"srs": srs, "srs_numeric": 2, "available_date": at, "burned": false}
        })
    }

    fn listing(items: Vec<Value>) -> Value {
        json!({"user_information": {"username": "u", "level": 2}, "requested_information": items})
    }

    fn fixtures() -> FakeUpstream {
        FakeUpstream::new()
            .with(
                &url("user-information"),
                json!({"user_information": {"username": "u", "level": 2}}),
            )
            .with(
                &url("radicals/2"),
                listing(vec![entry("r1", "apprentice", T1), entry("r2", "apprentice", T1), entry("r3", "guru", T2)]),
            )
            .with(
                &url("kanji/2"),
                listing(vec![
                    entry("k1", "apprentice", T1),
                    json!({"character": "k2", "meaning": "k2", "level": 2, "user_specific": null}),
                ]),
            )
            .with(&url("radicals/1,2"), listing(vec![entry("r1", "apprentice", T1)]))
            .with(&url("kanji/1,2"), listing(vec![entry("k1", "guru", T2)]))
            .with(
                &url("vocabulary/1,2"),
                json!({"requested_information": {"general": [entry("v1", "master", T2)]}}),
            )
    }

    fn client(upstream: FakeUpstream) -> WaniKaniClient<FakeUpstream, MemoryCache> {
        WaniKaniClient::new(
            ApiKey::parse("key1").unwrap(),
            BASE,
            CachingFetcher::new(upstream, MemoryCache::new(Duration::from_secs(60), 64)),
        )
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn profile_reads_level() {
        let profile = client(fixtures()).profile().await.unwrap();
        assert_eq!(profile.level, 2);
    }

    #[tokio::test]
    async fn blockers_filter_by_stage_and_group_by_time() {
        let queue = client(fixtures())
            .query_blockers(2, &ItemCategory::BLOCKING, &[SrsStage::Apprentice])
            .await
            .unwrap();

        assert_eq!(queue.bucket_count(), 1);
        let bucket = queue.get(&at(T1)).unwrap();
        let names: Vec<_> = bucket.iter().filter_map(|i| i.character.as_deref()).collect();
        assert_eq!(names, vec!["r1", "r2", "k1"]);
    }

    #[tokio::test]
    async fn upcoming_reviews_cover_all_categories() {
        let queue = client(fixtures()).upcoming_reviews().await.unwrap();
        assert_eq!(queue.item_count(), 3);
        assert_eq!(queue.get(&at(T1)).unwrap().len(), 1);
        let late: Vec<_> = queue.get(&at(T2)).unwrap().iter().map(|i| i.category).collect();
        assert_eq!(late, vec![ItemCategory::Kanji, ItemCategory::Vocabulary]);
    }

    #[tokio::test]
    async fn level_items_include_locked() {
        let items = client(fixtures())
            .level_items(2, &[ItemCategory::Kanji])
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].stage, SrsStage::Locked);
    }

    #[tokio::test]
    async fn repeated_queries_reuse_cached_listings() {
        let upstream = fixtures();
        let client = client(upstream.clone());
        client
            .query_blockers(2, &ItemCategory::BLOCKING, &[SrsStage::Apprentice])
            .await
            .unwrap();
        client.level_items(2, &ItemCategory::BLOCKING).await.unwrap();

        assert_eq!(upstream.calls(&url("radicals/2")), 1);
        assert_eq!(upstream.calls(&url("kanji/2")), 1);
        assert_eq!(upstream.total_calls(), 2);
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let upstream = FakeUpstream::new().with(
            &url("user-information"),
            json!({"error": {"code": "user_not_found", "message": "nope"}}),
        );
        let err = client(upstream).profile().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Rejected { .. }));
    }
}

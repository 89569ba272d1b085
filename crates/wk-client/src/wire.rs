//! v1.4 response shapes and their mapping onto core types.
//!
//! Every response is an envelope with `user_information` and, for listing
//! endpoints, `requested_information`. Radical and kanji listings are plain
//! arrays; vocabulary listings may come wrapped as `{"general": [...]}`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use wk_core::{ItemCategory, Profile, ReviewItem, SrsStage};

use crate::error::UpstreamError;

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    user_information: UserInformation,
}

#[derive(Debug, Deserialize)]
struct UserInformation {
    username: String,
    level: u32,
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    #[serde(default)]
    requested_information: Option<ItemList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemList {
    Flat(Vec<WireItem>),
    Grouped { general: Vec<WireItem> },
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireItem {
    character: Option<String>,
    meaning: Option<String>,
    level: u32,
    user_specific: Option<UserSpecific>,
}

#[derive(Debug, Deserialize)]
struct UserSpecific {
    srs: String,
    srs_numeric: Option<u8>,
    /// Unix seconds of the next review; `0` or absent when none is scheduled.
    available_date: Option<i64>,
    #[serde(default)]
    burned: bool,
}

/// Decode a `user-information` payload.
pub(crate) fn decode_profile(value: &Value) -> Result<Profile, UpstreamError> {
    let envelope = ProfileEnvelope::deserialize(value)
        .map_err(|e| UpstreamError::Parse(format!("user information: {e}")))?;
    Ok(Profile {
        username: envelope.user_information.username,
        level: envelope.user_information.level,
    })
}

/// Decode an item listing payload. A missing or null listing is empty.
pub(crate) fn decode_items(value: &Value) -> Result<Vec<WireItem>, UpstreamError> {
    let envelope = ItemsEnvelope::deserialize(value)
        .map_err(|e| UpstreamError::Parse(format!("item listing: {e}")))?;
    Ok(match envelope.requested_information {
        None => Vec::new(),
        Some(ItemList::Flat(items) | ItemList::Grouped { general: items }) => items,
    })
}

impl WireItem {
    /// Map onto a [`ReviewItem`] plus the instant of its next review, if any.
    ///
    /// Locked items (no per-user data) and burned items have no next review.
    pub(crate) fn into_review(
        self,
        category: ItemCategory,
    ) -> Result<(ReviewItem, Option<DateTime<Utc>>), UpstreamError> {
        let (stage, srs_rank, next_review) = match self.user_specific {
            None => (SrsStage::Locked, 0, None),
            Some(progress) => {
                let stage = progress
                    .srs
                    .parse::<SrsStage>()
                    .map_err(|e| UpstreamError::Parse(e.to_string()))?;
                let next_review = if progress.burned || stage == SrsStage::Burned {
                    None
                } else {
                    progress
                        .available_date
                        .filter(|secs| *secs > 0)
                        .map(|secs| {
                            DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                                UpstreamError::Parse(format!("timestamp out of range: {secs}"))
                            })
                        })
                        .transpose()?
                };
                (stage, progress.srs_numeric.unwrap_or_default(), next_review)
            }
        };

        let item = ReviewItem {
            category,
            stage,
            srs_rank,
            level: self.level,
            character: self.character,
            meaning: self.meaning.unwrap_or_default(),
        };
        Ok((item, next_review))
    }
}

//! Current-level progress toward the next level.
//!
//! Levelling up needs 90% of the level's kanji passed, so every category
//! reports a goal of `ceil(total * 0.9)` passed items.

use std::collections::BTreeMap;

use serde::Serialize;
use wk_core::{ItemCategory, Profile, ReviewItem, SrsStage};

/// Per-category breakdown for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub category: ItemCategory,
    pub total: usize,
    /// Items at Guru or beyond.
    pub passed: usize,
    pub goal: usize,
    /// Passed items still missing to reach `goal`.
    pub remaining: usize,
    pub stages: BTreeMap<SrsStage, usize>,
    /// Sorted by SRS rank, highest first.
    pub items: Vec<ReviewItem>,
}

impl CategoryProgress {
    #[must_use]
    pub fn from_items(category: ItemCategory, mut items: Vec<ReviewItem>) -> Self {
        // stable sort keeps listing order among equal ranks
        items.sort_by(|a, b| b.srs_rank.cmp(&a.srs_rank));

        let total = items.len();
        let passed = items.iter().filter(|i| i.stage.is_passed()).count();
        let goal = goal_for(total);
        let mut stages = BTreeMap::new();
        for item in &items {
            *stages.entry(item.stage).or_insert(0) += 1;
        }

        Self {
            category,
            total,
            passed,
            goal,
            remaining: goal.saturating_sub(passed),
            stages,
            items,
        }
    }
}

/// Dashboard for the learner's current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub username: String,
    pub level: u32,
    pub radicals: CategoryProgress,
    pub kanji: CategoryProgress,
}

impl LevelProgress {
    /// Split a mixed radical/kanji listing into per-category progress.
    #[must_use]
    pub fn from_items(profile: Profile, items: Vec<ReviewItem>) -> Self {
        let (radicals, kanji): (Vec<_>, Vec<_>) = items
            .into_iter()
            .filter(|i| i.category != ItemCategory::Vocabulary)
            .partition(|i| i.category == ItemCategory::Radical);

        Self {
            username: profile.username,
            level: profile.level,
            radicals: CategoryProgress::from_items(ItemCategory::Radical, radicals),
            kanji: CategoryProgress::from_items(ItemCategory::Kanji, kanji),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryProgress> {
        [&self.radicals, &self.kanji].into_iter()
    }
}

/// `ceil(total * 0.9)` in integer arithmetic.
#[must_use]
pub const fn goal_for(total: usize) -> usize {
    (total * 9).div_ceil(10)
}

//! Per-bucket category counts.

use serde::{Deserialize, Serialize};

use crate::entities::ReviewItem;
use crate::enums::ItemCategory;

/// Number of items per category in one bucket.
///
/// `total()` always equals the number of items tallied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub radicals: usize,
    pub kanji: usize,
    pub vocabulary: usize,
}

impl CategoryCount {
    /// Count every item by its category.
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a ReviewItem>) -> Self {
        let mut counts = Self::default();
        for item in items {
            counts.add(item.category);
        }
        counts
    }

    pub fn add(&mut self, category: ItemCategory) {
        match category {
            ItemCategory::Radical => self.radicals += 1,
            ItemCategory::Kanji => self.kanji += 1,
            ItemCategory::Vocabulary => self.vocabulary += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, category: ItemCategory) -> usize {
        match category {
            ItemCategory::Radical => self.radicals,
            ItemCategory::Kanji => self.kanji,
            ItemCategory::Vocabulary => self.vocabulary,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.radicals + self.kanji + self.vocabulary
    }
}

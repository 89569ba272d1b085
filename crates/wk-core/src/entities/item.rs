use serde::{Deserialize, Serialize};

use crate::enums::{ItemCategory, SrsStage};

/// A curriculum item as reported by the schedule source. Never mutated after fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReviewItem {
    pub category: ItemCategory,
    pub stage: SrsStage,
    /// Fine-grained SRS rank (0 for locked items, 1-9 otherwise).
    pub srs_rank: u8,
    pub level: u32,
    /// Display character. Some radicals only ship an image and have none.
    pub character: Option<String>,
    pub meaning: String,
}

impl ReviewItem {
    /// Minimal item with no display data, mostly useful for tests and fakes.
    #[must_use]
    pub fn bare(category: ItemCategory, stage: SrsStage) -> Self {
        Self {
            category,
            stage,
            srs_rank: 0,
            level: 0,
            character: None,
            meaning: String::new(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Learner profile. Only the fields the calendars need are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    /// Current curriculum level (starts at 1).
    pub level: u32,
}

//! Achievement Models

use jiff::Timestamp;

/// Achievement Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub achievement_id: i32,
    pub title: String,
    pub description: Option<String>,
}

/// New Achievement Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAchievement {
    pub title: String,
    pub description: Option<String>,
}

/// A user's grant of an achievement.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAchievement {
    pub user_id: i32,
    pub achievement_id: i32,
    pub awarded_at: Timestamp,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "rating_emoji", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RatingEmoji {
    Happy,
    Neutral,
    Sad,
}

impl RatingEmoji {
    pub fn to_str(&self) -> &str {
        match self {
            RatingEmoji::Happy => "happy",
            RatingEmoji::Neutral => "neutral",
            RatingEmoji::Sad => "sad",
        }
    }

    /// Fixed score used when no star rating accompanies the emoji.
    pub fn score(&self) -> f64 {
        match self {
            RatingEmoji::Happy => 5.0,
            RatingEmoji::Neutral => 3.0,
            RatingEmoji::Sad => 1.0,
        }
    }
}

/// Immutable once created; never updated or deleted.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Rating {
    pub id: Uuid,
    pub job_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub emoji: RatingEmoji,
    pub stars: Option<i32>,
    pub created_at: DateTime<Utc>,
}

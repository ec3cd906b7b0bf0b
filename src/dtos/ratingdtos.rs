use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::ratingdb::RatingWithAuthorRow,
    models::ratingmodel::{Rating, RatingEmoji},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingDto {
    pub job_id: Uuid,
    pub to_user_id: Uuid,

    // Enum deserialization rejects anything outside {happy, neutral, sad}.
    pub emoji: RatingEmoji,

    #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5"))]
    pub stars: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStatsDto {
    pub rating_avg: f64,
    pub rating_count: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmittedDto {
    pub rating: Rating,
    pub stats: RatingStatsDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAuthorDto {
    pub id: String,
    pub name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingListItemDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub work_type: String,
    pub emoji: RatingEmoji,
    pub stars: Option<i32>,
    pub author: RatingAuthorDto,
    pub created_at: DateTime<Utc>,
}

impl RatingListItemDto {
    pub fn from_row(row: &RatingWithAuthorRow) -> Self {
        RatingListItemDto {
            id: row.id,
            job_id: row.job_id,
            work_type: row.work_type.to_owned(),
            emoji: row.emoji,
            stars: row.stars,
            author: RatingAuthorDto {
                id: row.from_user_id.to_string(),
                name: row.author_name.to_owned(),
                photo_url: row.author_photo_url.clone(),
            },
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_out_of_range_rejected() {
        let dto = SubmitRatingDto {
            job_id: Uuid::new_v4(),
            to_user_id: Uuid::new_v4(),
            emoji: RatingEmoji::Happy,
            stars: Some(6),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn emoji_only_is_valid() {
        let dto = SubmitRatingDto {
            job_id: Uuid::new_v4(),
            to_user_id: Uuid::new_v4(),
            emoji: RatingEmoji::Sad,
            stars: None,
        };
        assert!(dto.validate().is_ok());
    }
}

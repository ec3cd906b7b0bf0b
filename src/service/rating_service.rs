// service/rating_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, jobdb::JobExt, ratingdb::RatingExt, userdb::UserExt},
    dtos::ratingdtos::{RatingListItemDto, RatingStatsDto, RatingSubmittedDto, SubmitRatingDto},
    models::ratingmodel::{Rating, RatingEmoji},
    service::error::ServiceError,
};

/// Numeric score of one rating: explicit stars win, otherwise the fixed
/// emoji table (happy 5, neutral 3, sad 1).
pub fn score_of(emoji: RatingEmoji, stars: Option<i32>) -> f64 {
    stars.map(|s| s as f64).unwrap_or_else(|| emoji.score())
}

/// Mean and count over a user's full rating history. Recomputed from
/// scratch on every submission; O(n) in lifetime ratings, and self-healing
/// if the stored aggregate ever drifts.
pub fn aggregate(ratings: &[Rating]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: f64 = ratings.iter().map(|r| score_of(r.emoji, r.stars)).sum();
    (sum / ratings.len() as f64, ratings.len() as i32)
}

/// Folds new ratings into each user's running average and count.
#[derive(Clone)]
pub struct RatingService {
    db_client: Arc<DBClient>,
}

impl RatingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn submit_rating(
        &self,
        from_user_id: Uuid,
        body: SubmitRatingDto,
    ) -> Result<RatingSubmittedDto, ServiceError> {
        self.db_client
            .get_job_by_id(body.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(body.job_id))?;

        let recipient = self
            .db_client
            .get_user(Some(body.to_user_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(body.to_user_id))?;

        let rating = self
            .db_client
            .create_rating(body.job_id, from_user_id, recipient.id, body.emoji, body.stars)
            .await?;

        let all = self.db_client.all_ratings_for_user(recipient.id).await?;
        let (rating_avg, rating_count) = aggregate(&all);

        let updated = self
            .db_client
            .update_user_rating(recipient.id, rating_avg, rating_count)
            .await?;

        Ok(RatingSubmittedDto {
            rating,
            stats: RatingStatsDto {
                rating_avg: updated.rating_avg,
                rating_count: updated.rating_count,
            },
        })
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RatingListItemDto>, ServiceError> {
        let rows = self.db_client.ratings_received(user_id, 50).await?;
        Ok(rows.iter().map(RatingListItemDto::from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rating(emoji: RatingEmoji, stars: Option<i32>) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            from_user_id: Uuid::new_v4(),
            to_user_id: Uuid::new_v4(),
            emoji,
            stars,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn stars_override_emoji_score() {
        assert_eq!(score_of(RatingEmoji::Sad, Some(4)), 4.0);
        assert_eq!(score_of(RatingEmoji::Sad, None), 1.0);
    }

    #[test]
    fn emoji_only_aggregate() {
        let ratings = vec![
            rating(RatingEmoji::Happy, None),
            rating(RatingEmoji::Sad, None),
            rating(RatingEmoji::Neutral, None),
        ];
        let (avg, count) = aggregate(&ratings);
        assert_eq!(avg, 3.0);
        assert_eq!(count, 3);
    }

    #[test]
    fn mixed_stars_and_emoji_aggregate() {
        let ratings = vec![
            rating(RatingEmoji::Happy, None),
            rating(RatingEmoji::Sad, None),
            rating(RatingEmoji::Neutral, None),
            rating(RatingEmoji::Neutral, Some(2)),
        ];
        let (avg, count) = aggregate(&ratings);
        assert_eq!(avg, 2.75);
        assert_eq!(count, 4);
    }

    #[test]
    fn empty_history_is_zeroes() {
        assert_eq!(aggregate(&[]), (0.0, 0));
    }
}

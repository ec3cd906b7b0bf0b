// db/ratingdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::ratingmodel::{Rating, RatingEmoji};

/// Rating row with the author's identity and the related job joined in.
#[derive(Debug, sqlx::FromRow)]
pub struct RatingWithAuthorRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub emoji: RatingEmoji,
    pub stars: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub work_type: String,
}

#[async_trait]
pub trait RatingExt {
    async fn create_rating(
        &self,
        job_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        emoji: RatingEmoji,
        stars: Option<i32>,
    ) -> Result<Rating, sqlx::Error>;

    /// Every rating the user has ever received, for the full recompute of
    /// the stored aggregate.
    async fn all_ratings_for_user(&self, user_id: Uuid) -> Result<Vec<Rating>, sqlx::Error>;

    async fn ratings_received(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RatingWithAuthorRow>, sqlx::Error>;
}

#[async_trait]
impl RatingExt for DBClient {
    async fn create_rating(
        &self,
        job_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        emoji: RatingEmoji,
        stars: Option<i32>,
    ) -> Result<Rating, sqlx::Error> {
        sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (job_id, from_user_id, to_user_id, emoji, stars)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, from_user_id, to_user_id, emoji, stars, created_at
            "#,
        )
        .bind(job_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(emoji)
        .bind(stars)
        .fetch_one(&self.pool)
        .await
    }

    async fn all_ratings_for_user(&self, user_id: Uuid) -> Result<Vec<Rating>, sqlx::Error> {
        sqlx::query_as::<_, Rating>(
            r#"
            SELECT id, job_id, from_user_id, to_user_id, emoji, stars, created_at
            FROM ratings
            WHERE to_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn ratings_received(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RatingWithAuthorRow>, sqlx::Error> {
        sqlx::query_as::<_, RatingWithAuthorRow>(
            r#"
            SELECT
                r.id, r.job_id, r.from_user_id, r.to_user_id, r.emoji, r.stars,
                r.created_at,
                u.name AS author_name,
                u.photo_url AS author_photo_url,
                j.work_type
            FROM ratings r
            JOIN users u ON u.id = r.from_user_id
            JOIN jobs j ON j.id = r.job_id
            WHERE r.to_user_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

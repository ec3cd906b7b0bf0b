// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{User, UserRole, UserStatus};

const USER_COLUMNS: &str = r#"
    id, phone, name, village, photo_url, land_acres, animal_count, skills,
    role, status, rating_avg, rating_count, created_at, updated_at
"#;

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        phone: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Upsert by the unique phone key. An existing user is returned as-is
    /// (touching only updated_at); a new row takes the given name and role.
    async fn save_user_by_phone(
        &self,
        phone: &str,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        village: Option<String>,
        photo_url: Option<String>,
        land_acres: Option<f64>,
        animal_count: Option<i32>,
        skills: Option<Vec<String>>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_role(&self, user_id: Uuid, role: UserRole) -> Result<User, sqlx::Error>;

    async fn update_user_rating(
        &self,
        user_id: Uuid,
        rating_avg: f64,
        rating_count: i32,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        phone: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        if let Some(user_id) = user_id {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(phone) = phone {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE phone = $1"
            ))
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
        } else {
            Ok(None)
        }
    }

    async fn save_user_by_phone(
        &self,
        phone: &str,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (phone, name, role)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, 'worker'))
            ON CONFLICT (phone) DO UPDATE SET updated_at = NOW()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(phone)
        .bind(name)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        village: Option<String>,
        photo_url: Option<String>,
        land_acres: Option<f64>,
        animal_count: Option<i32>,
        skills: Option<Vec<String>>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                village = COALESCE($3, village),
                photo_url = COALESCE($4, photo_url),
                land_acres = COALESCE($5, land_acres),
                animal_count = COALESCE($6, animal_count),
                skills = COALESCE($7, skills),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(village)
        .bind(photo_url)
        .bind(land_acres)
        .bind(animal_count)
        .bind(skills)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_role(&self, user_id: Uuid, role: UserRole) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_rating(
        &self,
        user_id: Uuid,
        rating_avg: f64,
        rating_count: i32,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET rating_avg = $2, rating_count = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(rating_avg)
        .bind(rating_count)
        .fetch_one(&self.pool)
        .await
    }
}

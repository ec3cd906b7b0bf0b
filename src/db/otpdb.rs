// db/otpdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::db::DBClient;

#[async_trait]
pub trait OtpExt {
    async fn store_otp(
        &self,
        phone: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error>;

    /// Consume a live code. Single use: the row is deleted when it matches.
    async fn take_otp(&self, phone: &str, code: &str) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl OtpExt for DBClient {
    async fn store_otp(
        &self,
        phone: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO otp_codes (phone, code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (phone) DO UPDATE
                SET code = $2, expires_at = $3, created_at = NOW()
            "#,
        )
        .bind(phone)
        .bind(code)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn take_otp(&self, phone: &str, code: &str) -> Result<bool, sqlx::Error> {
        let deleted: Option<String> = sqlx::query_scalar(
            r#"
            DELETE FROM otp_codes
            WHERE phone = $1 AND code = $2 AND expires_at > NOW()
            RETURNING phone
            "#,
        )
        .bind(phone)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }
}

// db/paymentdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::paymentmodel::{Payment, PaymentMethod, PaymentStatus};

const PAYMENT_COLUMNS: &str = r#"
    id, job_id, farmer_id, worker_id, amount, method, status,
    transaction_ref, paid_at, created_at
"#;

/// Payment row with job/farmer/worker summaries joined in, for the history
/// and detail views.
#[derive(Debug, sqlx::FromRow)]
pub struct PaymentDetailRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub farmer_id: Uuid,
    pub worker_id: Uuid,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub work_type: String,
    pub farmer_name: String,
    pub worker_name: String,
    pub worker_phone: String,
}

const PAYMENT_DETAIL_SELECT: &str = r#"
    SELECT
        p.id, p.job_id, p.farmer_id, p.worker_id, p.amount, p.method,
        p.status, p.transaction_ref, p.paid_at, p.created_at,
        j.work_type,
        f.name AS farmer_name,
        w.name AS worker_name,
        w.phone AS worker_phone
    FROM payments p
    JOIN jobs j ON j.id = p.job_id
    JOIN users f ON f.id = p.farmer_id
    JOIN users w ON w.id = p.worker_id
"#;

#[async_trait]
pub trait PaymentExt {
    /// Create one payment row per (worker, amount) share and mark the job
    /// completed, all inside a single transaction: a crash leaves either no
    /// settlement or the whole batch, never part of one.
    async fn create_settlement(
        &self,
        job_id: Uuid,
        farmer_id: Uuid,
        shares: &[(Uuid, BigDecimal)],
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_ref: Option<String>,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Vec<Payment>, sqlx::Error>;

    async fn get_payment_detail(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PaymentDetailRow>, sqlx::Error>;

    async fn payments_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PaymentDetailRow>, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_settlement(
        &self,
        job_id: Uuid,
        farmer_id: Uuid,
        shares: &[(Uuid, BigDecimal)],
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_ref: Option<String>,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut payments = Vec::with_capacity(shares.len());
        for (worker_id, amount) in shares {
            let payment = sqlx::query_as::<_, Payment>(&format!(
                r#"
                INSERT INTO payments
                    (job_id, farmer_id, worker_id, amount, method, status,
                     transaction_ref, paid_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {PAYMENT_COLUMNS}
                "#
            ))
            .bind(job_id)
            .bind(farmer_id)
            .bind(worker_id)
            .bind(amount)
            .bind(method)
            .bind(status)
            .bind(transaction_ref.as_deref())
            .bind(paid_at)
            .fetch_one(&mut *tx)
            .await?;

            payments.push(payment);
        }

        sqlx::query("UPDATE jobs SET status = 'completed', updated_at = NOW() WHERE id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(payments)
    }

    async fn get_payment_detail(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PaymentDetailRow>, sqlx::Error> {
        sqlx::query_as::<_, PaymentDetailRow>(&format!(
            "{PAYMENT_DETAIL_SELECT} WHERE p.id = $1"
        ))
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn payments_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PaymentDetailRow>, sqlx::Error> {
        sqlx::query_as::<_, PaymentDetailRow>(&format!(
            r#"
            {PAYMENT_DETAIL_SELECT}
            WHERE p.farmer_id = $1 OR p.worker_id = $1
            ORDER BY p.created_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

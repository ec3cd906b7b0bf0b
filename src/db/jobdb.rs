// db/jobdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Job, JobAcceptance, JobStatus, WorkerType};

const JOB_COLUMNS: &str = r#"
    id, farmer_id, work_type, worker_type, workers_needed, pay_per_day,
    location_village, location_lat, location_lon, status, created_at, updated_at
"#;

/// Pending-job listing row with the posting farmer's summary joined in.
#[derive(Debug, sqlx::FromRow)]
pub struct JobWithFarmerRow {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub work_type: String,
    pub worker_type: WorkerType,
    pub workers_needed: i32,
    pub pay_per_day: BigDecimal,
    pub location_village: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub farmer_name: String,
    pub farmer_phone: String,
    pub farmer_village: Option<String>,
    pub farmer_photo_url: Option<String>,
    pub farmer_rating_avg: f64,
}

#[async_trait]
pub trait JobExt {
    async fn create_job(
        &self,
        farmer_id: Uuid,
        work_type: String,
        worker_type: WorkerType,
        workers_needed: i32,
        pay_per_day: BigDecimal,
        location_village: Option<String>,
        location_lat: Option<f64>,
        location_lon: Option<f64>,
    ) -> Result<Job, sqlx::Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error>;

    async fn get_pending_jobs_with_farmer(
        &self,
        limit: i64,
    ) -> Result<Vec<JobWithFarmerRow>, sqlx::Error>;

    /// Conditional pending→matched transition. Returns None when the job is
    /// no longer pending, so exactly one of any concurrent accepts wins.
    async fn try_match_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error>;

    async fn create_job_acceptance(
        &self,
        job_id: Uuid,
        group_id: Option<Uuid>,
        worker_id: Option<Uuid>,
        accepted_by: Uuid,
    ) -> Result<JobAcceptance, sqlx::Error>;

    async fn get_job_acceptance(&self, job_id: Uuid)
        -> Result<Option<JobAcceptance>, sqlx::Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        farmer_id: Uuid,
        work_type: String,
        worker_type: WorkerType,
        workers_needed: i32,
        pay_per_day: BigDecimal,
        location_village: Option<String>,
        location_lat: Option<f64>,
        location_lon: Option<f64>,
    ) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs
                (farmer_id, work_type, worker_type, workers_needed, pay_per_day,
                 location_village, location_lat, location_lon)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(farmer_id)
        .bind(work_type)
        .bind(worker_type)
        .bind(workers_needed)
        .bind(pay_per_day)
        .bind(location_village)
        .bind(location_lat)
        .bind(location_lon)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_pending_jobs_with_farmer(
        &self,
        limit: i64,
    ) -> Result<Vec<JobWithFarmerRow>, sqlx::Error> {
        sqlx::query_as::<_, JobWithFarmerRow>(
            r#"
            SELECT
                j.id, j.farmer_id, j.work_type, j.worker_type, j.workers_needed,
                j.pay_per_day, j.location_village, j.location_lat, j.location_lon,
                j.status, j.created_at,
                u.name AS farmer_name,
                u.phone AS farmer_phone,
                u.village AS farmer_village,
                u.photo_url AS farmer_photo_url,
                u.rating_avg AS farmer_rating_avg
            FROM jobs j
            JOIN users u ON u.id = j.farmer_id
            WHERE j.status = 'pending'
            ORDER BY j.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn try_match_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs SET status = 'matched', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_job_acceptance(
        &self,
        job_id: Uuid,
        group_id: Option<Uuid>,
        worker_id: Option<Uuid>,
        accepted_by: Uuid,
    ) -> Result<JobAcceptance, sqlx::Error> {
        sqlx::query_as::<_, JobAcceptance>(
            r#"
            INSERT INTO job_acceptances (job_id, group_id, worker_id, accepted_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, group_id, worker_id, accepted_by, created_at
            "#,
        )
        .bind(job_id)
        .bind(group_id)
        .bind(worker_id)
        .bind(accepted_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_acceptance(
        &self,
        job_id: Uuid,
    ) -> Result<Option<JobAcceptance>, sqlx::Error> {
        sqlx::query_as::<_, JobAcceptance>(
            r#"
            SELECT id, job_id, group_id, worker_id, accepted_by, created_at
            FROM job_acceptances
            WHERE job_id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }
}

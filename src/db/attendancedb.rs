// db/attendancedb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::attendancemodel::Attendance;

const ATTENDANCE_COLUMNS: &str = r#"
    id, job_id, worker_id, check_in, check_out,
    check_in_lat, check_in_lon, check_out_lat, check_out_lon,
    qr_code_in, qr_code_out, hours_worked, created_at
"#;

/// Attendance listing row with the worker's summary joined in.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceWithWorkerRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub hours_worked: Option<f64>,
    pub worker_name: String,
    pub worker_phone: String,
    pub worker_photo_url: Option<String>,
    pub worker_rating_avg: f64,
}

#[async_trait]
pub trait AttendanceExt {
    /// Insert a new open session. The partial unique index on
    /// (job_id, worker_id) WHERE check_out IS NULL turns a concurrent
    /// duplicate into a 23505 the caller maps to Conflict.
    async fn create_check_in(
        &self,
        job_id: Uuid,
        worker_id: Uuid,
        qr_code_in: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Attendance, sqlx::Error>;

    async fn get_attendance_by_id(&self, id: Uuid) -> Result<Option<Attendance>, sqlx::Error>;

    /// Stamp the check-out. COALESCE keeps the first check-out timestamp so
    /// repeated calls recompute the same worked duration.
    async fn complete_check_out(
        &self,
        attendance_id: Uuid,
        qr_code_out: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Attendance, sqlx::Error>;

    async fn update_hours_worked(
        &self,
        attendance_id: Uuid,
        hours_worked: f64,
    ) -> Result<Attendance, sqlx::Error>;

    async fn list_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<AttendanceWithWorkerRow>, sqlx::Error>;

    /// Distinct workers with at least one attendance row for the job, in
    /// first-check-in order. This is the settlement's payee set.
    async fn distinct_workers_for_job(&self, job_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error>;
}

#[async_trait]
impl AttendanceExt for DBClient {
    async fn create_check_in(
        &self,
        job_id: Uuid,
        worker_id: Uuid,
        qr_code_in: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Attendance, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(&format!(
            r#"
            INSERT INTO attendance
                (job_id, worker_id, check_in, qr_code_in, check_in_lat, check_in_lon)
            VALUES ($1, $2, NOW(), $3, $4, $5)
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(worker_id)
        .bind(qr_code_in)
        .bind(lat)
        .bind(lon)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_attendance_by_id(&self, id: Uuid) -> Result<Option<Attendance>, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn complete_check_out(
        &self,
        attendance_id: Uuid,
        qr_code_out: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Attendance, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(&format!(
            r#"
            UPDATE attendance SET
                check_out = COALESCE(check_out, NOW()),
                qr_code_out = $2,
                check_out_lat = $3,
                check_out_lon = $4
            WHERE id = $1
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(attendance_id)
        .bind(qr_code_out)
        .bind(lat)
        .bind(lon)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_hours_worked(
        &self,
        attendance_id: Uuid,
        hours_worked: f64,
    ) -> Result<Attendance, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(&format!(
            r#"
            UPDATE attendance SET hours_worked = $2
            WHERE id = $1
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(attendance_id)
        .bind(hours_worked)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<AttendanceWithWorkerRow>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceWithWorkerRow>(
            r#"
            SELECT
                a.id, a.job_id, a.worker_id, a.check_in, a.check_out, a.hours_worked,
                u.name AS worker_name,
                u.phone AS worker_phone,
                u.photo_url AS worker_photo_url,
                u.rating_avg AS worker_rating_avg
            FROM attendance a
            JOIN users u ON u.id = a.worker_id
            WHERE a.job_id = $1
            ORDER BY a.check_in DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn distinct_workers_for_job(&self, job_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT worker_id FROM attendance
            WHERE job_id = $1
            GROUP BY worker_id
            ORDER BY MIN(check_in)
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}

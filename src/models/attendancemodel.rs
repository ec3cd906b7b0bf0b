use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One timed presence record: a worker at a job's worksite between
/// check-in and check-out. At most one row per (job, worker) may have
/// check_out unset; the partial unique index in the schema enforces it.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Attendance {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub check_in_lat: Option<f64>,
    pub check_in_lon: Option<f64>,
    pub check_out_lat: Option<f64>,
    pub check_out_lon: Option<f64>,
    pub qr_code_in: Option<String>,
    pub qr_code_out: Option<String>,
    pub hours_worked: Option<f64>,
    pub created_at: DateTime<Utc>,
}

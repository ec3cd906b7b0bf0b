use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Matched,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Matched => "matched",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "worker_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkerType {
    Individual,
    Group,
}

impl WorkerType {
    pub fn to_str(&self) -> &str {
        match self {
            WorkerType::Individual => "individual",
            WorkerType::Group => "group",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
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
    pub updated_at: DateTime<Utc>,
}

/// The record of who took a pending job. Exactly one per job: either a
/// group (group_id set, accepted_by = leader) or a single worker
/// (worker_id set, accepted_by = worker).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct JobAcceptance {
    pub id: Uuid,
    pub job_id: Uuid,
    pub group_id: Option<Uuid>,
    pub worker_id: Option<Uuid>,
    pub accepted_by: Uuid,
    pub created_at: DateTime<Utc>,
}

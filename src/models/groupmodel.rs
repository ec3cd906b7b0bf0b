use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct WorkerGroup {
    pub id: Uuid,
    pub name: String,
    pub leader_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct GroupMember {
    pub id: Uuid,
    pub group_id: Uuid,
    pub worker_id: Uuid,
    pub display_name: String,
    pub member_role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

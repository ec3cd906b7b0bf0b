// db/groupdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::groupmodel::{GroupMember, WorkerGroup};

#[async_trait]
pub trait GroupExt {
    async fn create_group(&self, name: String, leader_id: Uuid)
        -> Result<WorkerGroup, sqlx::Error>;

    async fn get_group(&self, group_id: Uuid) -> Result<Option<WorkerGroup>, sqlx::Error>;

    /// Duplicate (group, worker) pairs violate the table's unique
    /// constraint; the caller maps 23505 to Conflict.
    async fn add_group_member(
        &self,
        group_id: Uuid,
        worker_id: Uuid,
        display_name: String,
        member_role: String,
    ) -> Result<GroupMember, sqlx::Error>;

    async fn get_group_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, sqlx::Error>;
}

#[async_trait]
impl GroupExt for DBClient {
    async fn create_group(
        &self,
        name: String,
        leader_id: Uuid,
    ) -> Result<WorkerGroup, sqlx::Error> {
        sqlx::query_as::<_, WorkerGroup>(
            r#"
            INSERT INTO worker_groups (name, leader_id)
            VALUES ($1, $2)
            RETURNING id, name, leader_id, created_at
            "#,
        )
        .bind(name)
        .bind(leader_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<WorkerGroup>, sqlx::Error> {
        sqlx::query_as::<_, WorkerGroup>(
            "SELECT id, name, leader_id, created_at FROM worker_groups WHERE id = $1",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn add_group_member(
        &self,
        group_id: Uuid,
        worker_id: Uuid,
        display_name: String,
        member_role: String,
    ) -> Result<GroupMember, sqlx::Error> {
        sqlx::query_as::<_, GroupMember>(
            r#"
            INSERT INTO group_members (group_id, worker_id, display_name, member_role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, group_id, worker_id, display_name, member_role, status, created_at
            "#,
        )
        .bind(group_id)
        .bind(worker_id)
        .bind(display_name)
        .bind(member_role)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_group_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, sqlx::Error> {
        sqlx::query_as::<_, GroupMember>(
            r#"
            SELECT id, group_id, worker_id, display_name, member_role, status, created_at
            FROM group_members
            WHERE group_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
    }
}

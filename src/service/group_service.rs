// service/group_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, groupdb::GroupExt, userdb::UserExt},
    dtos::groupdtos::{AddGroupMemberDto, CreateGroupDto, GroupResponseDto},
    models::usermodel::{User, UserRole},
    service::error::ServiceError,
};

#[derive(Clone)]
pub struct GroupService {
    db_client: Arc<DBClient>,
}

impl GroupService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Creating a group promotes the creator to leader if they are not
    /// one already; the leader is also the group's first member.
    pub async fn create_group(
        &self,
        creator: &User,
        body: CreateGroupDto,
    ) -> Result<GroupResponseDto, ServiceError> {
        let group = self.db_client.create_group(body.name, creator.id).await?;

        if creator.role != UserRole::Leader {
            self.db_client
                .update_user_role(creator.id, UserRole::Leader)
                .await?;
        }

        self.db_client
            .add_group_member(
                group.id,
                creator.id,
                creator.name.clone(),
                "leader".to_string(),
            )
            .await?;

        let members = self.db_client.get_group_members(group.id).await?;

        tracing::info!(group_id = %group.id, leader_id = %creator.id, "worker group created");

        Ok(GroupResponseDto::from_group(&group, &members))
    }

    pub async fn add_member(
        &self,
        acting_user: &User,
        group_id: Uuid,
        body: AddGroupMemberDto,
    ) -> Result<GroupResponseDto, ServiceError> {
        let group = self
            .db_client
            .get_group(group_id)
            .await?
            .ok_or(ServiceError::GroupNotFound(group_id))?;

        if group.leader_id != acting_user.id {
            return Err(ServiceError::NotGroupLeader(acting_user.id, group_id));
        }

        let worker = self
            .db_client
            .get_user(None, Some(&body.phone))
            .await?
            .ok_or_else(|| {
                ServiceError::Validation(format!("No user registered with phone {}", body.phone))
            })?;

        let display_name = body.display_name.unwrap_or_else(|| worker.name.clone());
        let member_role = body.member_role.unwrap_or_else(|| "member".to_string());

        self.db_client
            .add_group_member(group_id, worker.id, display_name, member_role)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(ref db_err) = err {
                    if db_err.code().as_deref() == Some("23505") {
                        return ServiceError::Conflict(format!(
                            "Worker {} is already in group {}",
                            worker.id, group_id
                        ));
                    }
                }
                ServiceError::Database(err)
            })?;

        let members = self.db_client.get_group_members(group_id).await?;

        Ok(GroupResponseDto::from_group(&group, &members))
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<GroupResponseDto, ServiceError> {
        let group = self
            .db_client
            .get_group(group_id)
            .await?
            .ok_or(ServiceError::GroupNotFound(group_id))?;

        let members = self.db_client.get_group_members(group_id).await?;

        Ok(GroupResponseDto::from_group(&group, &members))
    }
}

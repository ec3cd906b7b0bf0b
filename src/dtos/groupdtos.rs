use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::groupmodel::{GroupMember, WorkerGroup};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupDto {
    #[validate(length(min = 1, max = 100, message = "Group name must be between 1-100 characters"))]
    pub name: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGroupMemberDto {
    #[validate(length(min = 10, max = 16, message = "Phone number must be 10-15 digits"))]
    pub phone: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub display_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Role must be between 1-50 characters"))]
    pub member_role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberDto {
    pub id: String,
    pub worker_id: String,
    pub display_name: String,
    pub member_role: String,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

impl GroupMemberDto {
    pub fn from_member(member: &GroupMember) -> Self {
        GroupMemberDto {
            id: member.id.to_string(),
            worker_id: member.worker_id.to_string(),
            display_name: member.display_name.clone(),
            member_role: member.member_role.clone(),
            status: member.status.clone(),
            joined_at: member.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponseDto {
    pub id: String,
    pub name: String,
    pub leader_id: String,
    pub created_at: DateTime<Utc>,
    pub members: Vec<GroupMemberDto>,
}

impl GroupResponseDto {
    pub fn from_group(group: &WorkerGroup, members: &[GroupMember]) -> Self {
        GroupResponseDto {
            id: group.id.to_string(),
            name: group.name.clone(),
            leader_id: group.leader_id.to_string(),
            created_at: group.created_at,
            members: members.iter().map(GroupMemberDto::from_member).collect(),
        }
    }
}

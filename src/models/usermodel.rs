use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Farmer,
    Worker,
    Leader,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Farmer => "farmer",
            UserRole::Worker => "worker",
            UserRole::Leader => "leader",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Available,
    Working,
    Offline,
}

impl UserStatus {
    pub fn to_str(&self) -> &str {
        match self {
            UserStatus::Available => "available",
            UserStatus::Working => "working",
            UserStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub phone: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_acres: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_count: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,

    pub role: UserRole,
    pub status: UserStatus,

    // Invariant: rating_avg is the mean over every rating received and
    // rating_count is how many have been folded in.
    pub rating_avg: f64,
    pub rating_count: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct OtpCode {
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

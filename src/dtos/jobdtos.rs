use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::jobdb::JobWithFarmerRow,
    models::{
        jobmodel::{Job, JobAcceptance, JobStatus, WorkerType},
        usermodel::User,
    },
    utils::currency::decimal_to_f64,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 100, message = "Work type is required"))]
    pub work_type: String,

    #[validate(range(min = 0.01, message = "Pay per day must be positive"))]
    pub pay_per_day: f64,

    pub worker_type: Option<WorkerType>,

    #[validate(range(min = 1, max = 100, message = "Workers needed must be between 1 and 100"))]
    pub workers_needed: Option<i32>,

    #[validate(length(min = 1, max = 100, message = "Village must be between 1-100 characters"))]
    pub location_village: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub location_lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub location_lon: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcceptAsGroupDto {
    pub group_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerInfoDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub village: Option<String>,
    pub photo_url: Option<String>,
    pub rating_avg: f64,
}

impl FarmerInfoDto {
    pub fn from_user(user: &User) -> Self {
        FarmerInfoDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            phone: user.phone.to_owned(),
            village: user.village.clone(),
            photo_url: user.photo_url.clone(),
            rating_avg: user.rating_avg,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponseDto {
    pub id: Uuid,
    pub work_type: String,
    pub worker_type: WorkerType,
    pub workers_needed: i32,
    pub pay_per_day: f64,
    pub location_village: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub status: JobStatus,
    pub farmer: FarmerInfoDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance: Option<JobAcceptance>,
    pub created_at: DateTime<Utc>,
}

impl JobResponseDto {
    pub fn from_job(job: &Job, farmer: &User, acceptance: Option<JobAcceptance>) -> Self {
        JobResponseDto {
            id: job.id,
            work_type: job.work_type.to_owned(),
            worker_type: job.worker_type,
            workers_needed: job.workers_needed,
            pay_per_day: decimal_to_f64(&job.pay_per_day),
            location_village: job.location_village.clone(),
            location_lat: job.location_lat,
            location_lon: job.location_lon,
            status: job.status,
            farmer: FarmerInfoDto::from_user(farmer),
            acceptance,
            created_at: job.created_at,
        }
    }

    pub fn from_listing_row(row: &JobWithFarmerRow) -> Self {
        JobResponseDto {
            id: row.id,
            work_type: row.work_type.to_owned(),
            worker_type: row.worker_type,
            workers_needed: row.workers_needed,
            pay_per_day: decimal_to_f64(&row.pay_per_day),
            location_village: row.location_village.clone(),
            location_lat: row.location_lat,
            location_lon: row.location_lon,
            status: row.status,
            farmer: FarmerInfoDto {
                id: row.farmer_id.to_string(),
                name: row.farmer_name.to_owned(),
                phone: row.farmer_phone.to_owned(),
                village: row.farmer_village.clone(),
                photo_url: row.farmer_photo_url.clone(),
                rating_avg: row.farmer_rating_avg,
            },
            acceptance: None,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_dto() -> CreateJobDto {
        CreateJobDto {
            work_type: "harvesting".to_string(),
            pay_per_day: 500.0,
            worker_type: None,
            workers_needed: Some(2),
            location_village: Some("Rampur".to_string()),
            location_lat: Some(26.85),
            location_lon: Some(80.95),
        }
    }

    #[test]
    fn valid_job_passes() {
        assert!(base_dto().validate().is_ok());
    }

    #[test]
    fn empty_work_type_rejected() {
        let mut dto = base_dto();
        dto.work_type = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn non_positive_pay_rejected() {
        let mut dto = base_dto();
        dto.pay_per_day = 0.0;
        assert!(dto.validate().is_err());
    }
}

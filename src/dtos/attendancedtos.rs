use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::attendancedb::AttendanceWithWorkerRow,
    dtos::userdtos::UserSummaryDto,
    models::attendancemodel::Attendance,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDto {
    pub job_id: Uuid,
    pub worker_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "QR payload is required"))]
    pub qr_code_in: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutDto {
    #[validate(length(min = 1, max = 255, message = "QR payload is required"))]
    pub qr_code_out: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponseDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub hours_worked: Option<f64>,
}

impl AttendanceResponseDto {
    pub fn from_attendance(a: &Attendance) -> Self {
        AttendanceResponseDto {
            id: a.id,
            job_id: a.job_id,
            worker_id: a.worker_id,
            check_in: a.check_in,
            check_out: a.check_out,
            hours_worked: a.hours_worked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListItemDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub hours_worked: Option<f64>,
    pub worker: UserSummaryDto,
}

impl AttendanceListItemDto {
    pub fn from_row(row: &AttendanceWithWorkerRow) -> Self {
        AttendanceListItemDto {
            id: row.id,
            job_id: row.job_id,
            check_in: row.check_in,
            check_out: row.check_out,
            hours_worked: row.hours_worked,
            worker: UserSummaryDto {
                id: row.worker_id.to_string(),
                name: row.worker_name.to_owned(),
                phone: row.worker_phone.to_owned(),
                photo_url: row.worker_photo_url.clone(),
                rating_avg: row.worker_rating_avg,
            },
        }
    }
}

// service/attendance_service.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::{attendancedb::AttendanceExt, db::DBClient, jobdb::JobExt, userdb::UserExt},
    dtos::attendancedtos::{
        AttendanceListItemDto, AttendanceResponseDto, CheckInDto, CheckOutDto,
    },
    events::{job_topic, EventHub, EVENT_ATTENDANCE_CHECK_IN},
    models::usermodel::{User, UserStatus},
    service::error::ServiceError,
};

/// Worked duration in hours, clamped at zero. Device clocks at a worksite
/// are not trustworthy enough to reject a skewed pair outright; the raw
/// timestamps stay on the row for reconciliation.
pub fn hours_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> f64 {
    let seconds = (check_out - check_in).num_seconds() as f64;
    (seconds / 3600.0).max(0.0)
}

/// Owns check-in/check-out and the one-open-session invariant.
#[derive(Clone)]
pub struct AttendanceService {
    db_client: Arc<DBClient>,
    events: EventHub,
}

impl AttendanceService {
    pub fn new(db_client: Arc<DBClient>, events: EventHub) -> Self {
        Self { db_client, events }
    }

    pub async fn check_in(
        &self,
        acting_user: &User,
        body: CheckInDto,
    ) -> Result<AttendanceResponseDto, ServiceError> {
        // Workers check themselves in; the session identity must match.
        if body.worker_id != acting_user.id {
            return Err(ServiceError::Forbidden(
                "You can only check in as yourself".to_string(),
            ));
        }

        let job = self
            .db_client
            .get_job_by_id(body.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(body.job_id))?;

        // The partial unique index rejects a second open session no matter
        // how the concurrent inserts interleave.
        let attendance = self
            .db_client
            .create_check_in(job.id, body.worker_id, body.qr_code_in, body.lat, body.lon)
            .await
            .map_err(|e| ServiceError::from_check_in_insert(e, job.id, body.worker_id))?;

        self.db_client
            .update_user_status(body.worker_id, UserStatus::Working)
            .await?;

        self.events
            .publish_to_topic(
                &job_topic(job.id),
                EVENT_ATTENDANCE_CHECK_IN,
                json!({
                    "attendanceId": attendance.id,
                    "worker": {
                        "id": acting_user.id,
                        "name": acting_user.name,
                        "photoUrl": acting_user.photo_url,
                    },
                    "timestamp": attendance.check_in,
                }),
            )
            .await;

        Ok(AttendanceResponseDto::from_attendance(&attendance))
    }

    pub async fn check_out(
        &self,
        acting_user: &User,
        attendance_id: Uuid,
        body: CheckOutDto,
    ) -> Result<AttendanceResponseDto, ServiceError> {
        let attendance = self
            .db_client
            .get_attendance_by_id(attendance_id)
            .await?
            .ok_or(ServiceError::AttendanceNotFound(attendance_id))?;

        if attendance.worker_id != acting_user.id {
            return Err(ServiceError::UnauthorizedAttendanceAccess(
                acting_user.id,
                attendance_id,
            ));
        }

        let stamped = self
            .db_client
            .complete_check_out(attendance_id, body.qr_code_out, body.lat, body.lon)
            .await?;

        // The timestamp is kept from the first check-out, so recomputing
        // here makes repeated calls land on the same stored hours.
        let check_out = stamped.check_out.unwrap_or(stamped.check_in);
        let hours = hours_between(stamped.check_in, check_out);

        let finished = self
            .db_client
            .update_hours_worked(attendance_id, hours)
            .await?;

        self.db_client
            .update_user_status(attendance.worker_id, UserStatus::Available)
            .await?;

        Ok(AttendanceResponseDto::from_attendance(&finished))
    }

    pub async fn list_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<AttendanceListItemDto>, ServiceError> {
        self.db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let rows = self.db_client.list_for_job(job_id).await?;
        Ok(rows.iter().map(AttendanceListItemDto::from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn full_workday_is_eight_hours() {
        let check_in = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 6, 1, 17, 0, 0).unwrap();
        assert_eq!(hours_between(check_in, check_out), 8.0);
    }

    #[test]
    fn partial_hours_are_fractional() {
        let check_in = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 6, 1, 13, 30, 0).unwrap();
        assert_eq!(hours_between(check_in, check_out), 4.5);
    }

    #[test]
    fn clock_skew_clamps_to_zero() {
        // Check-out reported before check-in: record zero, not negative.
        let check_in = Utc.with_ymd_and_hms(2025, 6, 1, 17, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(hours_between(check_in, check_out), 0.0);
    }
}

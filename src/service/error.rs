use crate::{error::HttpError, models::jobmodel::JobStatus};
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Group {0} not found")]
    GroupNotFound(Uuid),

    #[error("Payment {0} not found")]
    PaymentNotFound(Uuid),

    #[error("Attendance record {0} not found")]
    AttendanceNotFound(Uuid),

    #[error("Job {0} is not in status {1:?}")]
    InvalidJobStatus(Uuid, JobStatus),

    #[error("Worker {1} already has an open session for job {0}")]
    AlreadyCheckedIn(Uuid, Uuid),

    #[error("No attendance records exist for job {0}")]
    NoAttendance(Uuid),

    #[error("User {0} is not the leader of group {1}")]
    NotGroupLeader(Uuid, Uuid),

    #[error("User {0} is not authorized to perform this action on job {1}")]
    UnauthorizedJobAccess(Uuid, Uuid),

    #[error("User {0} does not own attendance record {1}")]
    UnauthorizedAttendanceAccess(Uuid, Uuid),

    #[error("{0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Map a store-level uniqueness violation on the open-session index to
    /// the check-in conflict; everything else stays a server error.
    pub fn from_check_in_insert(err: sqlx::Error, job_id: Uuid, worker_id: Uuid) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return ServiceError::AlreadyCheckedIn(job_id, worker_id);
            }
        }
        ServiceError::Database(err)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::JobNotFound(_)
            | ServiceError::UserNotFound(_)
            | ServiceError::GroupNotFound(_)
            | ServiceError::PaymentNotFound(_)
            | ServiceError::AttendanceNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::Validation(_) | ServiceError::NoAttendance(_) => StatusCode::BAD_REQUEST,

            ServiceError::InvalidJobStatus(_, _)
            | ServiceError::AlreadyCheckedIn(_, _)
            | ServiceError::Conflict(_) => StatusCode::CONFLICT,

            ServiceError::NotGroupLeader(_, _)
            | ServiceError::UnauthorizedJobAccess(_, _)
            | ServiceError::UnauthorizedAttendanceAccess(_, _)
            | ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        if let ServiceError::Database(ref e) = error {
            tracing::error!("store failure: {}", e);
        }
        HttpError::new(error.to_string(), error.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let id = Uuid::new_v4();
        assert_eq!(ServiceError::JobNotFound(id).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::PaymentNotFound(id).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn open_session_conflict_maps_to_409() {
        let (j, w) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(
            ServiceError::AlreadyCheckedIn(j, w).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::InvalidJobStatus(j, JobStatus::Matched).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn missing_attendance_is_a_client_error() {
        assert_eq!(
            ServiceError::NoAttendance(Uuid::new_v4()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unique_violation_becomes_already_checked_in() {
        // A non-database sqlx error must stay a server error.
        let (j, w) = (Uuid::new_v4(), Uuid::new_v4());
        let err = ServiceError::from_check_in_insert(sqlx::Error::RowNotFound, j, w);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

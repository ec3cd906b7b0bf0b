// handler/attendance.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        attendancedtos::{CheckInDto, CheckOutDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn attendance_handler() -> Router {
    Router::new()
        .route("/check-in", post(check_in))
        .route("/:attendance_id/check-out", put(check_out))
        .route("/job/:job_id", get(list_for_job))
}

pub async fn check_in(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CheckInDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let attendance = app_state
        .attendance_service
        .check_in(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Checked in successfully", attendance)),
    ))
}

pub async fn check_out(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(attendance_id): Path<Uuid>,
    Json(body): Json<CheckOutDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let attendance = app_state
        .attendance_service
        .check_out(&auth.user, attendance_id, body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Checked out successfully",
        attendance,
    )))
}

pub async fn list_for_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .attendance_service
        .list_for_job(job_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Attendance retrieved successfully",
        rows,
    )))
}

// handler/jobs.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        jobdtos::{AcceptAsGroupDto, CreateJobDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/", post(create_job))
        .route("/nearby", get(list_nearby_jobs))
        .route("/:job_id", get(get_job))
        .route("/:job_id/accept", post(accept_job))
        .route("/:job_id/accept-group", post(accept_as_group))
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .job_service
        .create_job(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Job posted successfully", job)),
    ))
}

pub async fn list_nearby_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .list_nearby_jobs()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .get_job(job_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Job retrieved successfully", job)))
}

pub async fn accept_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .accept_job(job_id, &auth.user)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Job accepted successfully", job)))
}

pub async fn accept_as_group(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<AcceptAsGroupDto>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .accept_as_group(body.group_id, job_id, &auth.user)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Job accepted by group successfully",
        job,
    )))
}

// handler/groups.rs
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
        groupdtos::{AddGroupMemberDto, CreateGroupDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn groups_handler() -> Router {
    Router::new()
        .route("/", post(create_group))
        .route("/:group_id", get(get_group))
        .route("/:group_id/members", post(add_member))
}

pub async fn create_group(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateGroupDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let group = app_state
        .group_service
        .create_group(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Group created successfully", group)),
    ))
}

pub async fn get_group(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let group = app_state
        .group_service
        .get_group(group_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Group retrieved successfully", group)))
}

pub async fn add_member(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<AddGroupMemberDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let group = app_state
        .group_service
        .add_member(&auth.user, group_id, body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Member added successfully", group)))
}

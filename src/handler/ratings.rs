// handler/ratings.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{ratingdtos::SubmitRatingDto, ApiResponse},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn ratings_handler() -> Router {
    Router::new()
        .route("/", post(submit_rating))
        .route("/user/:user_id", get(list_for_user))
}

pub async fn submit_rating(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SubmitRatingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .rating_service
        .submit_rating(auth.user.id, body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Rating submitted successfully",
        result,
    )))
}

pub async fn list_for_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ratings = app_state
        .rating_service
        .list_for_user(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Ratings retrieved successfully",
        ratings,
    )))
}

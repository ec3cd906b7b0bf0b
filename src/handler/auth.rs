// handler/auth.rs
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    db::{otpdb::OtpExt, userdb::UserExt},
    dtos::userdtos::{
        FilterUserDto, OtpRequestedDto, RequestOtpDto, UserLoginResponseDto, VerifyOtpDto,
    },
    error::{ErrorMessage, HttpError},
    utils::{otp_generator::generate_otp, token},
    AppState,
};

const OTP_TTL_MINUTES: i64 = 10;

pub fn auth_handler() -> Router {
    Router::new()
        .route("/otp/request", post(request_otp))
        .route("/otp/verify", post(verify_otp))
}

/// Issue a one-time code for a phone number. Delivery is an external
/// concern; the code is logged and, in dev setups, echoed back.
pub async fn request_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RequestOtpDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let otp = generate_otp();
    let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);

    app_state
        .db_client
        .store_otp(&body.phone, &otp, expires_at)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(phone = %body.phone, "OTP issued");

    let dev_otp = app_state.env.expose_dev_otp.then_some(otp);

    Ok(Json(OtpRequestedDto {
        status: "success".to_string(),
        message: "OTP sent".to_string(),
        dev_otp,
    }))
}

/// Verify a code, upsert the user by phone and mint a session token.
pub async fn verify_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<VerifyOtpDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let valid = app_state
        .db_client
        .take_otp(&body.phone, &body.otp)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !valid {
        return Err(HttpError::unauthorized(
            ErrorMessage::OtpExpiredOrInvalid.to_string(),
        ));
    }

    let user = app_state
        .db_client
        .save_user_by_phone(&body.phone, body.name, body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::seconds(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie.to_string().parse().map_err(|_| {
            HttpError::server_error("Failed to build session cookie".to_string())
        })?,
    );

    tracing::info!(user_id = %user.id, "login via OTP");

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
        user: FilterUserDto::filter_user(&user),
    });

    Ok((StatusCode::OK, headers, response))
}

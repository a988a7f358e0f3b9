//! OTP enrollment endpoints. Both require an access token.

use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use super::{
    auth_error_response, principal,
    types::{EnableOtpRequest, Message, UserPublic},
};
use crate::auth::{self, AuthState, qr};
use crate::users::PgUserStore;

#[utoipa::path(
    get,
    path = "/auth/otp/generate",
    responses(
        (status = 200, description = "PNG QR code of the provisioning URI"),
        (status = 400, description = "OTP already enabled", body = Message),
        (status = 401, description = "Missing or invalid token", body = Message)
    ),
    security(("bearer" = [])),
    tag = "otp"
)]
// axum handler to start (or resume) OTP enrollment
pub async fn generate(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
) -> impl IntoResponse {
    let user = match principal::require_user(&headers, &state, &store).await {
        Ok(user) => user,
        Err((status, message)) => {
            return (status, Json(Message { message })).into_response();
        }
    };

    let uri = match auth::begin_otp_enrollment(&state, &store, &user).await {
        Ok(uri) => uri,
        Err(err) => {
            let (status, message) = auth_error_response(&err);
            return (status, Json(Message { message })).into_response();
        }
    };

    match qr::render_png(&uri, state.config().qr_scale()) {
        Ok(png) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            png,
        )
            .into_response(),
        Err(err) => {
            error!("failed to render provisioning QR code: {err:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Message {
                    message: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/auth/otp/enable",
    request_body = EnableOtpRequest,
    responses(
        (status = 200, description = "OTP enabled for the account", body = UserPublic),
        (status = 400, description = "Rejected code or already enabled", body = Message),
        (status = 401, description = "Missing or invalid token", body = Message)
    ),
    security(("bearer" = [])),
    tag = "otp"
)]
// axum handler to complete OTP enrollment
pub async fn enable(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
    Json(body): Json<EnableOtpRequest>,
) -> impl IntoResponse {
    let user = match principal::require_user(&headers, &state, &store).await {
        Ok(user) => user,
        Err((status, message)) => {
            return (status, Json(Message { message })).into_response();
        }
    };

    match auth::enable_otp(&state, &store, &user, &body.totp_code).await {
        Ok(enabled) => (StatusCode::OK, Json(UserPublic::from(enabled))).into_response(),
        Err(err) => {
            let (status, message) = auth_error_response(&err);
            (status, Json(Message { message })).into_response()
        }
    }
}

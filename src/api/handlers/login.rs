//! Login, token introspection, and password recovery endpoints.

use axum::{
    Extension, Form, Json,
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use super::{
    auth_error_response, principal,
    types::{LoginForm, Message, NewPassword, TokenResponse, TotpLoginForm, UserPublic},
};
use crate::auth::{self, AuthState, Login};
use crate::email::EmailSender;
use crate::users::PgUserStore;

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 40;

// Counted in characters, not bytes: a multi-byte password near the top of
// the range must not be rejected early.
fn password_length_ok(password: &str) -> bool {
    let length = password.chars().count();
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&length)
}

#[utoipa::path(
    post,
    path = "/login/access-token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token, or a temp token when TOTP is required", body = TokenResponse),
        (status = 400, description = "Bad credentials or inactive account", body = Message)
    ),
    tag = "login"
)]
// axum handler for the password stage of login
pub async fn access_token(
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    match auth::login(&state, &store, &form.username, &form.password).await {
        Ok(Login::Authenticated { access_token }) => {
            (StatusCode::OK, Json(TokenResponse::bearer(access_token))).into_response()
        }
        Ok(Login::TotpRequired { temp_token }) => (
            StatusCode::OK,
            Json(TokenResponse::totp_challenge(temp_token)),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = auth_error_response(&err);
            (status, Json(Message { message })).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login/access-token/otp",
    request_body(content = TotpLoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token after a verified TOTP code", body = TokenResponse),
        (status = 400, description = "Rejected TOTP code", body = Message),
        (status = 401, description = "Invalid or expired temp token", body = Message)
    ),
    tag = "login"
)]
// axum handler for the TOTP stage of login
pub async fn access_token_otp(
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
    Form(form): Form<TotpLoginForm>,
) -> impl IntoResponse {
    match auth::complete_otp_login(&state, &store, &form.temp_token, &form.totp_code).await {
        Ok(access_token) => {
            (StatusCode::OK, Json(TokenResponse::bearer(access_token))).into_response()
        }
        Err(err) => {
            let (status, message) = auth_error_response(&err);
            (status, Json(Message { message })).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login/test-token",
    responses(
        (status = 200, description = "The user behind the presented access token", body = UserPublic),
        (status = 401, description = "Missing or invalid token", body = Message)
    ),
    security(("bearer" = [])),
    tag = "login"
)]
// axum handler to introspect an access token
pub async fn test_token(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
) -> impl IntoResponse {
    match principal::require_user(&headers, &state, &store).await {
        Ok(user) => (StatusCode::OK, Json(UserPublic::from(user))).into_response(),
        Err((status, message)) => (status, Json(Message { message })).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/password-recovery/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Recovery accepted whether or not the email is registered", body = Message)
    ),
    tag = "login"
)]
// axum handler to request a password-reset email
pub async fn password_recovery(
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
    Extension(mailer): Extension<Arc<dyn EmailSender>>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    match auth::recover_password(&state, &store, mailer.as_ref(), &email).await {
        // Same body either way, so the endpoint cannot probe for accounts.
        Ok(()) => (
            StatusCode::OK,
            Json(Message {
                message: "Password recovery email sent".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = auth_error_response(&err);
            (status, Json(Message { message })).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/reset-password",
    request_body = NewPassword,
    responses(
        (status = 200, description = "Password updated", body = Message),
        (status = 400, description = "Rejected password", body = Message),
        (status = 401, description = "Invalid or expired reset token", body = Message)
    ),
    tag = "login"
)]
// axum handler to redeem a password-reset token
pub async fn reset_password(
    Extension(state): Extension<Arc<AuthState>>,
    Extension(store): Extension<PgUserStore>,
    Json(body): Json<NewPassword>,
) -> impl IntoResponse {
    if !password_length_ok(&body.new_password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(Message {
                message: format!(
                    "Password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"
                ),
            }),
        )
            .into_response();
    }

    match auth::reset_password(&state, &store, &body.token, &body.new_password).await {
        Ok(()) => (
            StatusCode::OK,
            Json(Message {
                message: "Password updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = auth_error_response(&err);
            (status, Json(Message { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_bounds_count_characters_not_bytes() {
        assert!(!password_length_ok("short7!"));
        assert!(password_length_ok("exactly8"));
        assert!(password_length_ok(&"a".repeat(40)));
        assert!(!password_length_ok(&"a".repeat(41)));

        // 40 multi-byte characters is 120 bytes but still within bounds.
        let wide = "ñ".repeat(40);
        assert!(wide.len() > 40);
        assert!(password_length_ok(&wide));
        assert!(!password_length_ok(&"ñ".repeat(41)));
    }
}

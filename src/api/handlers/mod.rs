//! HTTP handlers: thin adapters between axum and the auth flows.
//!
//! Handlers translate typed [`AuthError`] outcomes into status codes and
//! never leak store faults to clients beyond a generic 500.

use axum::http::StatusCode;
use tracing::error;

use crate::auth::AuthError;

pub(crate) mod health;
pub(crate) mod login;
pub(crate) mod otp;
mod principal;
pub(crate) mod types;

/// Map an auth outcome to a response. Expired tokens keep a distinct
/// message so clients know to restart the flow instead of retrying.
pub(crate) fn auth_error_response(err: &AuthError) -> (StatusCode, String) {
    match err {
        AuthError::InvalidCredentials => (
            StatusCode::BAD_REQUEST,
            "Incorrect email or password".to_string(),
        ),
        AuthError::InactiveAccount => (StatusCode::BAD_REQUEST, "Inactive user".to_string()),
        AuthError::InvalidOtp => (StatusCode::BAD_REQUEST, "Invalid TOTP code".to_string()),
        AuthError::AlreadyEnabled => (StatusCode::BAD_REQUEST, "OTP already enabled".to_string()),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
        AuthError::ExpiredToken => (
            StatusCode::UNAUTHORIZED,
            "Temporary token expired. Start the login process again".to_string(),
        ),
        AuthError::Store(fault) => {
            error!("store fault in auth flow: {fault:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_outcomes_map_to_4xx() {
        let (status, _) = auth_error_response(&AuthError::InvalidCredentials);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = auth_error_response(&AuthError::InvalidOtp);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = auth_error_response(&AuthError::AlreadyEnabled);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = auth_error_response(&AuthError::InvalidToken);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn expired_and_invalid_tokens_get_distinct_messages() {
        let (expired_status, expired_message) = auth_error_response(&AuthError::ExpiredToken);
        let (invalid_status, invalid_message) = auth_error_response(&AuthError::InvalidToken);
        assert_eq!(expired_status, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid_status, StatusCode::UNAUTHORIZED);
        assert_ne!(expired_message, invalid_message);
    }

    #[test]
    fn store_faults_become_opaque_500s() {
        let (status, message) =
            auth_error_response(&AuthError::Store(anyhow::anyhow!("connection refused")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("connection"));
    }
}

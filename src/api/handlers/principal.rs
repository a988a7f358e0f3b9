//! Bearer-token authentication for protected endpoints.

use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use tracing::error;

use crate::auth::{AuthState, TokenKind};
use crate::users::{PgUserStore, User, UserStore};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the calling user from an `Authorization: Bearer` access token.
///
/// # Errors
///
/// 401 for a missing/invalid/expired token or a non-access token type,
/// 404 when the subject no longer exists, 400 for an inactive account,
/// 500 for store faults.
pub(crate) async fn require_user(
    headers: &HeaderMap,
    state: &AuthState,
    store: &PgUserStore,
) -> Result<User, (StatusCode, String)> {
    let token = bearer_token(headers).ok_or((
        StatusCode::UNAUTHORIZED,
        "Not authenticated".to_string(),
    ))?;

    let claims = state
        .codec()
        .decode(token)
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Could not validate credentials".to_string()))?;
    if claims.kind != TokenKind::Access {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Could not validate credentials".to_string(),
        ));
    }

    let user_id = claims.sub.parse().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            "Could not validate credentials".to_string(),
        )
    })?;

    let user = store
        .find_by_id(user_id)
        .await
        .map_err(|err| {
            error!("failed to resolve authenticated user: {err:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    if !user.is_active {
        return Err((StatusCode::BAD_REQUEST, "Inactive user".to_string()));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok-123"));
        assert_eq!(bearer_token(&headers), Some("tok-123"));
    }
}

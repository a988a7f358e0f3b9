//! Request/response types for the auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::users::User;

/// OAuth2-compatible password login form.
#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginForm {
    /// The account email.
    pub username: String,
    pub password: String,
}

/// Second stage of the login flow: temp token plus the authenticator code.
#[derive(ToSchema, Deserialize, Debug)]
pub struct TotpLoginForm {
    pub temp_token: String,
    pub totp_code: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_token: Option<String>,
    pub token_type: String,
    pub requires_totp: bool,
}

impl TokenResponse {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            temp_token: None,
            token_type: "bearer".to_string(),
            requires_totp: false,
        }
    }

    #[must_use]
    pub fn totp_challenge(temp_token: String) -> Self {
        Self {
            access_token: None,
            temp_token: Some(temp_token),
            token_type: "temp_totp".to_string(),
            requires_totp: true,
        }
    }
}

#[derive(ToSchema, Deserialize, Debug)]
pub struct EnableOtpRequest {
    pub totp_code: String,
}

#[derive(ToSchema, Deserialize, Debug)]
pub struct NewPassword {
    pub token: String,
    pub new_password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Message {
    pub message: String,
}

/// The user as exposed to clients. Neither the password hash nor the OTP
/// secret ever appears here.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserPublic {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub otp_enabled: bool,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            otp_enabled: user.otp_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_view_omits_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@example.com".to_string(),
            full_name: None,
            hashed_password: "$argon2id$...".to_string(),
            is_active: true,
            is_superuser: false,
            otp_enabled: true,
            otp_secret: Some("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string()),
        };

        let value = serde_json::to_value(UserPublic::from(user)).unwrap();
        assert!(value.get("hashed_password").is_none());
        assert!(value.get("otp_secret").is_none());
        assert_eq!(value["otp_enabled"], serde_json::Value::Bool(true));
    }

    #[test]
    fn token_response_shapes() {
        let value = serde_json::to_value(TokenResponse::bearer("tok".to_string())).unwrap();
        assert_eq!(value["token_type"], "bearer");
        assert_eq!(value["requires_totp"], serde_json::Value::Bool(false));
        assert!(value.get("temp_token").is_none());

        let value = serde_json::to_value(TokenResponse::totp_challenge("tmp".to_string())).unwrap();
        assert_eq!(value["token_type"], "temp_totp");
        assert_eq!(value["requires_totp"], serde_json::Value::Bool(true));
        assert!(value.get("access_token").is_none());
    }
}

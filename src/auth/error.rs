//! Expected authentication outcomes as typed errors.
//!
//! Everything here is a user-facing result the HTTP boundary maps to a
//! status code. Store and infrastructure faults travel through the
//! transparent `Store` variant untouched and surface as 5xx.

use super::token::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad email/password pair. Deliberately covers "no such user" too, so
    /// responses cannot be used to enumerate accounts.
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("inactive user")]
    InactiveAccount,
    /// Bad signature, malformed structure, or wrong token type.
    #[error("invalid token")]
    InvalidToken,
    /// Distinct from `InvalidToken` so clients know to restart the flow
    /// rather than retry the same token.
    #[error("token expired")]
    ExpiredToken,
    /// Wrong, missing, or out-of-window one-time code.
    #[error("invalid TOTP code")]
    InvalidOtp,
    /// OTP enrollment state conflict.
    #[error("OTP already enabled")]
    AlreadyEnabled,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::ExpiredToken,
            _ => Self::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_keeps_its_identity_through_conversion() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::ExpiredToken
        ));
    }

    #[test]
    fn other_token_failures_collapse_to_invalid() {
        for err in [
            TokenError::TokenFormat,
            TokenError::Base64,
            TokenError::InvalidSignature,
            TokenError::UnsupportedAlg("none".to_string()),
        ] {
            assert!(matches!(AuthError::from(err), AuthError::InvalidToken));
        }
    }
}

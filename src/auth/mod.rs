//! Authentication flows: password login, the TOTP challenge, OTP
//! enrollment, and password recovery.
//!
//! Login is a two-step challenge when OTP is enabled: the password stage
//! yields a short-lived temp token instead of an access token, and the OTP
//! stage exchanges temp token + code for the real thing. Keeping the stages
//! separate bounds the exposure window of an intercepted temp token and
//! lets each stage be rate-limited independently by the outer layers.
//!
//! Every function here is a short synchronous computation plus at most a
//! couple of store round-trips; failures from the store propagate untouched
//! and are never retried.

use chrono::{Duration, Utc};
use tracing::debug;

use crate::email::{EmailMessage, EmailSender};
use crate::users::{User, UserStore};

pub mod error;
pub mod password;
pub mod qr;
pub mod state;
pub mod token;
pub mod totp;

pub use error::AuthError;
pub use state::{AuthConfig, AuthState};
pub use token::{Claims, TokenCodec, TokenKind};


/// Outcome of the password stage.
#[derive(Debug)]
pub enum Login {
    /// OTP is not enabled on the account; the access token is final.
    Authenticated { access_token: String },
    /// OTP is enabled; the caller must present a code together with this
    /// temp token to finish logging in. No access token exists yet.
    TotpRequired { temp_token: String },
}

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Verify an email/password pair and start a session.
///
/// A missing user and a wrong password are indistinguishable in the result,
/// so responses cannot be used to enumerate accounts.
///
/// # Errors
///
/// `InvalidCredentials`, `InactiveAccount`, or a store fault.
pub async fn login<S: UserStore>(
    state: &AuthState,
    store: &S,
    email: &str,
    password: &str,
) -> Result<Login, AuthError> {
    let Some(user) = store.find_by_email(email).await? else {
        return Err(AuthError::InvalidCredentials);
    };
    if !password::verify(password, &user.hashed_password) {
        return Err(AuthError::InvalidCredentials);
    }
    if !user.is_active {
        return Err(AuthError::InactiveAccount);
    }

    if user.otp_enabled {
        let temp_token = state.codec().issue(
            Claims::temp_totp(user.email.clone()),
            Duration::minutes(state.config().temp_token_ttl_minutes()),
        )?;
        debug!(user_id = %user.id, "password accepted, awaiting TOTP");
        return Ok(Login::TotpRequired { temp_token });
    }

    let access_token = state.codec().issue(
        Claims::access(user.id.to_string()),
        Duration::minutes(state.config().access_token_ttl_minutes()),
    )?;
    Ok(Login::Authenticated { access_token })
}

/// Exchange a temp token plus a TOTP code for an access token.
///
/// # Errors
///
/// `ExpiredToken`/`InvalidToken` from the codec (a wrong token type is
/// `InvalidToken`), `InvalidCredentials` when the email no longer resolves,
/// `InvalidOtp` when the code is rejected, or a store fault.
pub async fn complete_otp_login<S: UserStore>(
    state: &AuthState,
    store: &S,
    temp_token: &str,
    totp_code: &str,
) -> Result<String, AuthError> {
    let claims = state.codec().decode(temp_token)?;
    if claims.kind != TokenKind::TempTotp {
        return Err(AuthError::InvalidToken);
    }

    let Some(user) = store.find_by_email(&claims.sub).await? else {
        return Err(AuthError::InvalidCredentials);
    };
    if !validate_otp(state, &user, totp_code) {
        return Err(AuthError::InvalidOtp);
    }

    let access_token = state.codec().issue(
        Claims::access_totp_verified(user.id.to_string()),
        Duration::minutes(state.config().access_token_ttl_minutes()),
    )?;
    Ok(access_token)
}

/// Check a submitted code against the user's OTP state.
///
/// Vacuously true when OTP is not enabled (nothing to prove). When it is,
/// an empty code, a missing secret, or a code outside the drift window all
/// read as `false`; this never errors.
#[must_use]
pub fn validate_otp(state: &AuthState, user: &User, submitted_code: &str) -> bool {
    if !user.otp_enabled {
        return true;
    }
    let Some(secret) = user.otp_secret.as_deref() else {
        return false;
    };
    totp::verify_at(
        submitted_code,
        secret,
        unix_now(),
        state.config().totp_window(),
    )
}

/// Start (or resume) OTP enrollment and return the provisioning URI.
///
/// Idempotent before `enable_otp`: a secret is generated and persisted only
/// when none exists yet, so repeated calls hand back a URI over the same
/// secret instead of invalidating a code the user is about to type.
///
/// # Errors
///
/// `AlreadyEnabled` once enrollment has completed, or a store fault.
pub async fn begin_otp_enrollment<S: UserStore>(
    state: &AuthState,
    store: &S,
    user: &User,
) -> Result<String, AuthError> {
    if user.otp_enabled {
        return Err(AuthError::AlreadyEnabled);
    }

    let secret = match user.otp_secret.clone() {
        Some(secret) => secret,
        None => {
            let secret = totp::generate_secret();
            let mut pending = user.clone();
            pending.otp_secret = Some(secret);
            let saved = store.save(&pending).await?;
            // The store keeps the first committed secret on a racing write;
            // trust what actually landed.
            saved
                .otp_secret
                .ok_or_else(|| AuthError::Store(anyhow::anyhow!("store dropped otp secret")))?
        }
    };

    let uri = totp::provisioning_uri(&secret, &user.email, state.config().totp_issuer())
        .map_err(|err| AuthError::Store(err.into()))?;
    Ok(uri)
}

/// Complete enrollment: prove possession of the provisioned secret with a
/// current code, then flip `otp_enabled`.
///
/// # Errors
///
/// `AlreadyEnabled` on a repeat call, `InvalidOtp` when there is no
/// provisioned secret or the code is rejected, or a store fault.
pub async fn enable_otp<S: UserStore>(
    state: &AuthState,
    store: &S,
    user: &User,
    submitted_code: &str,
) -> Result<User, AuthError> {
    if user.otp_enabled {
        return Err(AuthError::AlreadyEnabled);
    }
    let Some(secret) = user.otp_secret.as_deref() else {
        return Err(AuthError::InvalidOtp);
    };
    if !totp::verify_at(
        submitted_code,
        secret,
        unix_now(),
        state.config().totp_window(),
    ) {
        return Err(AuthError::InvalidOtp);
    }

    let mut enabled = user.clone();
    enabled.otp_enabled = true;
    Ok(store.save(&enabled).await?)
}

/// Issue a password-reset token and hand the mailer a reset email.
///
/// Succeeds whether or not the email resolves to an account, so the
/// endpoint cannot be used to probe for registered addresses.
///
/// # Errors
///
/// Store or mailer faults only.
pub async fn recover_password<S: UserStore>(
    state: &AuthState,
    store: &S,
    mailer: &dyn EmailSender,
    email: &str,
) -> Result<(), AuthError> {
    let Some(user) = store.find_by_email(email).await? else {
        debug!("password recovery requested for unknown email");
        return Ok(());
    };

    let reset_token = state.codec().issue(
        Claims::password_reset(user.email.clone()),
        Duration::hours(state.config().reset_token_ttl_hours()),
    )?;
    let reset_url = format!(
        "{}/reset-password?token={reset_token}",
        state.config().frontend_base_url().trim_end_matches('/')
    );

    let payload = serde_json::json!({
        "url": reset_url,
        "name": user.full_name.as_deref().unwrap_or(&user.username),
    });
    mailer.send(&EmailMessage {
        to_email: user.email,
        template: "password_reset".to_string(),
        payload_json: payload.to_string(),
    })?;
    Ok(())
}

/// Redeem a password-reset token and store the new password hash.
///
/// # Errors
///
/// `ExpiredToken`/`InvalidToken` for a bad or wrong-type token,
/// `InvalidCredentials` when the email no longer resolves,
/// `InactiveAccount`, or a store fault.
pub async fn reset_password<S: UserStore>(
    state: &AuthState,
    store: &S,
    token: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    let claims = state.codec().decode(token)?;
    if claims.kind != TokenKind::PasswordReset {
        return Err(AuthError::InvalidToken);
    }

    let Some(user) = store.find_by_email(&claims.sub).await? else {
        return Err(AuthError::InvalidCredentials);
    };
    if !user.is_active {
        return Err(AuthError::InactiveAccount);
    }

    let hashed = password::hash(new_password)
        .map_err(|err| AuthError::Store(anyhow::anyhow!("password hashing failed: {err}")))?;
    let mut updated = user;
    updated.hashed_password = hashed;
    store.save(&updated).await?;
    Ok(())
}

//! # Ingreso (User Accounts & TOTP Two-Factor Login)
//!
//! `ingreso` is a user-account backend whose login flow is built around
//! TOTP two-factor authentication.
//!
//! ## Login Flow
//!
//! Login is a two-step challenge when an account has OTP enabled:
//!
//! - **Password stage:** a valid email/password pair yields either a final
//!   access token (OTP disabled) or a short-lived temp token (OTP enabled).
//! - **OTP stage:** the temp token plus a current authenticator code are
//!   exchanged for the access token. Access tokens issued this way carry a
//!   `totp_verified` marker.
//!
//! A missing account and a wrong password are indistinguishable in responses,
//! so the login endpoints cannot be used to enumerate accounts.
//!
//! ## Enrollment
//!
//! Enrollment provisions a base32 secret, serves it as a QR-encoded
//! `otpauth://` URI, and only flips `otp_enabled` once the user proves
//! possession by submitting a valid code. Requesting the QR again before
//! enabling reuses the committed secret instead of invalidating it.
//!
//! ## Tokens
//!
//! All tokens are HS256 JWTs signed with a single process-wide key. The
//! token `type` claim (`access`, `temp_totp`, `password_reset`) is checked
//! at every point of use; a token of one type never stands in for another.

pub mod api;
pub mod auth;
pub mod cli;
pub mod email;
pub mod users;

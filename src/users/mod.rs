//! User records and the store contract the auth flows depend on.
//!
//! The auth core never talks to a database directly; it sees users through
//! [`UserStore`], a narrow read/save interface. Postgres backs it in
//! production, an in-memory map in tests.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod postgres;

#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgUserStore;

/// A user record as the auth core sees it.
///
/// Invariant: `otp_enabled` implies `otp_secret` is present and was produced
/// by the TOTP engine. The secret and the password hash stay server-side;
/// only the `UserPublic` projection crosses the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub otp_enabled: bool,
    pub otp_secret: Option<String>,
}

/// Read/save contract over user records.
///
/// `save` is an atomic upsert of the mutated fields. Implementations must
/// never replace an already-committed `otp_secret`: concurrent enrollment
/// calls may race on read-modify-write, and at most one secret may ever be
/// committed per user. Transient failures are the implementation's problem;
/// the core propagates errors without retrying.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn save(&self, user: &User) -> Result<User>;
}

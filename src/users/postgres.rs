//! Postgres-backed user store.

use anyhow::{Context, Result, anyhow};
use sqlx::{FromRow, PgPool, Row, postgres::PgRow};
use tracing::Instrument;
use uuid::Uuid;

use super::{User, UserStore};

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            hashed_password: row.try_get("hashed_password")?,
            is_active: row.try_get("is_active")?,
            is_superuser: row.try_get("is_superuser")?,
            otp_enabled: row.try_get("otp_enabled")?,
            otp_secret: row.try_get("otp_secret")?,
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, email, full_name, hashed_password, is_active, is_superuser, otp_enabled, otp_secret";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = %query
        );
        sqlx::query_as(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up user by email")
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = %query
        );
        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up user by id")
    }

    async fn save(&self, user: &User) -> Result<User> {
        // COALESCE keeps the first committed secret: two racing enrollment
        // calls cannot end up committing different secrets for one user.
        let query = format!(
            r"
            UPDATE users
            SET username = $2,
                email = $3,
                full_name = $4,
                hashed_password = $5,
                is_active = $6,
                is_superuser = $7,
                otp_enabled = $8,
                otp_secret = COALESCE(users.otp_secret, $9)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        );
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = %query
        );
        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.hashed_password)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .bind(user.otp_enabled)
            .bind(&user.otp_secret)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to save user")?;

        match row {
            Some(row) => User::from_row(&row).context("failed to decode saved user"),
            None => Err(anyhow!("user {} not found", user.id)),
        }
    }
}

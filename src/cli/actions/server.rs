use crate::{api, auth::AuthConfig};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub secret_key: SecretString,
    pub access_token_ttl_minutes: i64,
    pub temp_token_ttl_minutes: i64,
    pub reset_token_ttl_hours: i64,
    pub frontend_base_url: String,
    pub totp_issuer: String,
    pub totp_window: u8,
    pub qr_scale: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = AuthConfig::new()
        .with_access_token_ttl_minutes(args.access_token_ttl_minutes)
        .with_temp_token_ttl_minutes(args.temp_token_ttl_minutes)
        .with_reset_token_ttl_hours(args.reset_token_ttl_hours)
        .with_totp_issuer(args.totp_issuer)
        .with_totp_window(args.totp_window)
        .with_qr_scale(args.qr_scale)
        .with_frontend_base_url(args.frontend_base_url);

    let secret_key = args.secret_key.expose_secret().as_bytes().to_vec();

    api::new(args.port, args.dsn, secret_key, config).await
}

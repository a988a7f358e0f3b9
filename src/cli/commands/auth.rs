use anyhow::{Context, Result};
use clap::{Arg, Command};
use secrecy::SecretString;

pub const ARG_SECRET_KEY: &str = "secret-key";

pub fn with_args(command: Command) -> Command {
    let command = with_token_args(command);
    with_otp_args(command)
}

fn with_token_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SECRET_KEY)
                .long("secret-key")
                .help("Key used to sign and verify tokens")
                .env("INGRESO_SECRET_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("access-token-ttl-minutes")
                .long("access-token-ttl-minutes")
                .help("Access token TTL in minutes")
                .env("INGRESO_ACCESS_TOKEN_TTL_MINUTES")
                .default_value("11520")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("temp-token-ttl-minutes")
                .long("temp-token-ttl-minutes")
                .help("Temporary TOTP token TTL in minutes")
                .env("INGRESO_TEMP_TOKEN_TTL_MINUTES")
                .default_value("5")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("reset-token-ttl-hours")
                .long("reset-token-ttl-hours")
                .help("Password reset token TTL in hours")
                .env("INGRESO_RESET_TOKEN_TTL_HOURS")
                .default_value("48")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("frontend-base-url")
                .long("frontend-base-url")
                .help("Frontend base URL used for password reset links and CORS")
                .env("INGRESO_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
}

fn with_otp_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("totp-issuer")
                .long("totp-issuer")
                .help("Issuer name shown in authenticator apps")
                .env("INGRESO_TOTP_ISSUER")
                .default_value("Ingreso"),
        )
        .arg(
            Arg::new("totp-window")
                .long("totp-window")
                .help("Accepted clock drift in 30-second steps")
                .env("INGRESO_TOTP_WINDOW")
                .default_value("1")
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new("qr-scale")
                .long("qr-scale")
                .help("Pixels per QR module in the enrollment image")
                .env("INGRESO_QR_SCALE")
                .default_value("5")
                .value_parser(clap::value_parser!(u32)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub secret_key: SecretString,
    pub access_token_ttl_minutes: i64,
    pub temp_token_ttl_minutes: i64,
    pub reset_token_ttl_hours: i64,
    pub frontend_base_url: String,
    pub totp_issuer: String,
    pub totp_window: u8,
    pub qr_scale: u32,
}

impl Options {
    /// Read the auth options out of parsed matches.
    ///
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let secret_key = matches
            .get_one::<String>(ARG_SECRET_KEY)
            .cloned()
            .context("missing required argument: --secret-key")?;

        Ok(Self {
            secret_key: SecretString::from(secret_key),
            access_token_ttl_minutes: matches
                .get_one::<i64>("access-token-ttl-minutes")
                .copied()
                .unwrap_or(11520),
            temp_token_ttl_minutes: matches
                .get_one::<i64>("temp-token-ttl-minutes")
                .copied()
                .unwrap_or(5),
            reset_token_ttl_hours: matches
                .get_one::<i64>("reset-token-ttl-hours")
                .copied()
                .unwrap_or(48),
            frontend_base_url: matches
                .get_one::<String>("frontend-base-url")
                .cloned()
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            totp_issuer: matches
                .get_one::<String>("totp-issuer")
                .cloned()
                .unwrap_or_else(|| "Ingreso".to_string()),
            totp_window: matches.get_one::<u8>("totp-window").copied().unwrap_or(1),
            qr_scale: matches.get_one::<u32>("qr-scale").copied().unwrap_or(5),
        })
    }
}

//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! action, such as starting the API server with its full configuration state.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::auth;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        secret_key: auth_opts.secret_key,
        access_token_ttl_minutes: auth_opts.access_token_ttl_minutes,
        temp_token_ttl_minutes: auth_opts.temp_token_ttl_minutes,
        reset_token_ttl_hours: auth_opts.reset_token_ttl_hours,
        frontend_base_url: auth_opts.frontend_base_url,
        totp_issuer: auth_opts.totp_issuer,
        totp_window: auth_opts.totp_window,
        qr_scale: auth_opts.qr_scale,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_action_from_matches() {
        temp_env::with_vars([("INGRESO_PORT", None::<&str>)], || {
            let command = crate::cli::commands::new();
            let matches = command.get_matches_from(vec![
                "ingreso",
                "--dsn",
                "postgres://user@localhost:5432/ingreso",
                "--secret-key",
                "not-a-real-key",
                "--totp-issuer",
                "Acme",
            ]);

            let action = handler(&matches);
            assert!(action.is_ok());
            if let Ok(Action::Server(args)) = action {
                assert_eq!(args.port, 8080);
                assert_eq!(args.dsn, "postgres://user@localhost:5432/ingreso");
                assert_eq!(args.totp_issuer, "Acme");
                assert_eq!(args.access_token_ttl_minutes, 11520);
            }
        });
    }
}

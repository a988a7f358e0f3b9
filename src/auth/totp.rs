//! TOTP secret generation, code derivation, and drift-window verification.
//!
//! Codes follow RFC 6238 with the parameters every authenticator app ships
//! with: SHA1, 6 digits, 30-second step. Secrets are 160 bits, encoded as
//! 32 base32 characters. A drift window of ±1 step tolerates client clocks
//! that are slightly off; codes are not replay-tracked beyond that window.

use totp_rs::{Algorithm, Secret, TOTP};
use url::Url;

pub const DIGITS: usize = 6;
pub const STEP_SECONDS: u64 = 30;
pub const DEFAULT_WINDOW: u8 = 1;

/// Generate a fresh 160-bit shared secret, base32-encoded.
#[must_use]
pub fn generate_secret() -> String {
    Secret::generate_secret().to_encoded().to_string()
}

fn build(secret: &str, window: u8) -> Option<TOTP> {
    let bytes = Secret::Encoded(secret.to_string()).to_bytes().ok()?;
    // Issuer and account only matter for URL rendering, which goes through
    // provisioning_uri instead.
    TOTP::new(
        Algorithm::SHA1,
        DIGITS,
        window,
        STEP_SECONDS,
        bytes,
        None,
        "account".to_string(),
    )
    .ok()
}

/// The 6-digit code for the time step containing `at` (unix seconds).
///
/// `None` when the secret is not valid base32.
#[must_use]
pub fn code_at(secret: &str, at: u64) -> Option<String> {
    Some(build(secret, DEFAULT_WINDOW)?.generate(at))
}

/// Check a submitted code against the secret at time `at`, accepting any
/// step within ±`window` steps.
///
/// Empty or non-numeric submissions and malformed secrets are a plain
/// `false`; verification never errors.
#[must_use]
pub fn verify_at(submitted: &str, secret: &str, at: u64, window: u8) -> bool {
    if submitted.len() != DIGITS || !submitted.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match build(secret, window) {
        Some(totp) => totp.check(submitted, at),
        None => false,
    }
}

/// Build the standard enrollment URI consumed by authenticator apps:
/// `otpauth://totp/{issuer}:{email}?secret=..&issuer=..&algorithm=SHA1&digits=6&period=30`.
///
/// This is the only place the raw secret ever leaves the server, and only
/// during enrollment (rendered as a QR image at the boundary).
///
/// # Errors
///
/// Returns an error if the URI cannot be assembled.
pub fn provisioning_uri(
    secret: &str,
    email: &str,
    issuer: &str,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse("otpauth://totp")?;
    url.set_path(&format!("/{issuer}:{email}"));
    url.query_pairs_mut()
        .append_pair("secret", secret)
        .append_pair("issuer", issuer)
        .append_pair("algorithm", "SHA1")
        .append_pair("digits", "6")
        .append_pair("period", "30");
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 appendix B secret: ASCII "12345678901234567890".
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn generated_secrets_are_32_char_base32() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 32);
        assert!(
            secret
                .bytes()
                .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
        );
        assert_ne!(secret, generate_secret());
    }

    #[test]
    fn matches_rfc_6238_vector() {
        // T=59 falls in counter 1; the 6-digit SHA1 code is 287082.
        assert_eq!(code_at(RFC_SECRET, 59).as_deref(), Some("287082"));
        assert!(verify_at("287082", RFC_SECRET, 59, DEFAULT_WINDOW));
    }

    #[test]
    fn accepts_codes_within_drift_window() {
        let code = code_at(RFC_SECRET, 1_000_000).unwrap();
        assert!(verify_at(&code, RFC_SECRET, 1_000_000, 1));
        assert!(verify_at(&code, RFC_SECRET, 1_000_000 + 30, 1));
        assert!(verify_at(&code, RFC_SECRET, 1_000_000 - 30, 1));
    }

    #[test]
    fn rejects_codes_outside_drift_window() {
        let code = code_at(RFC_SECRET, 1_000_000).unwrap();
        assert!(!verify_at(&code, RFC_SECRET, 1_000_000 + 120, 1));
        assert!(!verify_at(&code, RFC_SECRET, 1_000_000 - 120, 1));
    }

    #[test]
    fn rejects_malformed_input_without_error() {
        assert!(!verify_at("", RFC_SECRET, 59, 1));
        assert!(!verify_at("28708", RFC_SECRET, 59, 1));
        assert!(!verify_at("28708a", RFC_SECRET, 59, 1));
        assert!(!verify_at("287082", "not base32!!", 59, 1));
        assert!(!verify_at("287082", "", 59, 1));
    }

    #[test]
    fn provisioning_uri_has_standard_shape() {
        let uri = provisioning_uri(RFC_SECRET, "a@example.com", "Ingreso").unwrap();
        assert!(uri.starts_with("otpauth://totp/Ingreso:a"));
        assert!(uri.contains(&format!("secret={RFC_SECRET}")));
        assert!(uri.contains("issuer=Ingreso"));
        assert!(uri.contains("algorithm=SHA1"));
        assert!(uri.contains("digits=6"));
        assert!(uri.contains("period=30"));
    }
}

//! Auth configuration and shared state.

use super::token::TokenCodec;

const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 8;
const DEFAULT_TEMP_TOKEN_TTL_MINUTES: i64 = 5;
const DEFAULT_RESET_TOKEN_TTL_HOURS: i64 = 48;
const DEFAULT_TOTP_ISSUER: &str = "Ingreso";
const DEFAULT_FRONTEND_BASE_URL: &str = "http://localhost:3000";

/// Immutable configuration, constructed once at process start and passed by
/// reference into the auth flows. Never mutated afterwards.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    access_token_ttl_minutes: i64,
    temp_token_ttl_minutes: i64,
    reset_token_ttl_hours: i64,
    totp_issuer: String,
    totp_window: u8,
    qr_scale: u32,
    frontend_base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            access_token_ttl_minutes: DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            temp_token_ttl_minutes: DEFAULT_TEMP_TOKEN_TTL_MINUTES,
            reset_token_ttl_hours: DEFAULT_RESET_TOKEN_TTL_HOURS,
            totp_issuer: DEFAULT_TOTP_ISSUER.to_string(),
            totp_window: super::totp::DEFAULT_WINDOW,
            qr_scale: super::qr::DEFAULT_SCALE,
            frontend_base_url: DEFAULT_FRONTEND_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_access_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_temp_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.temp_token_ttl_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_reset_token_ttl_hours(mut self, hours: i64) -> Self {
        self.reset_token_ttl_hours = hours;
        self
    }

    #[must_use]
    pub fn with_totp_issuer(mut self, issuer: String) -> Self {
        self.totp_issuer = issuer;
        self
    }

    #[must_use]
    pub fn with_totp_window(mut self, window: u8) -> Self {
        self.totp_window = window;
        self
    }

    #[must_use]
    pub fn with_qr_scale(mut self, scale: u32) -> Self {
        self.qr_scale = scale;
        self
    }

    #[must_use]
    pub fn with_frontend_base_url(mut self, url: String) -> Self {
        self.frontend_base_url = url;
        self
    }

    #[must_use]
    pub fn access_token_ttl_minutes(&self) -> i64 {
        self.access_token_ttl_minutes
    }

    #[must_use]
    pub fn temp_token_ttl_minutes(&self) -> i64 {
        self.temp_token_ttl_minutes
    }

    #[must_use]
    pub fn reset_token_ttl_hours(&self) -> i64 {
        self.reset_token_ttl_hours
    }

    #[must_use]
    pub fn totp_issuer(&self) -> &str {
        &self.totp_issuer
    }

    #[must_use]
    pub fn totp_window(&self) -> u8 {
        self.totp_window
    }

    #[must_use]
    pub fn qr_scale(&self) -> u32 {
        self.qr_scale
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }
}

/// Configuration plus the signing codec, shared across requests.
pub struct AuthState {
    config: AuthConfig,
    codec: TokenCodec,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, codec: TokenCodec) -> Self {
        Self { config, codec }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_lifetimes() {
        let config = AuthConfig::new();
        assert_eq!(config.access_token_ttl_minutes(), 60 * 24 * 8);
        assert_eq!(config.temp_token_ttl_minutes(), 5);
        assert_eq!(config.reset_token_ttl_hours(), 48);
        assert_eq!(config.totp_issuer(), "Ingreso");
        assert_eq!(config.totp_window(), 1);
        assert_eq!(config.qr_scale(), 5);
        assert_eq!(config.frontend_base_url(), "http://localhost:3000");
    }

    #[test]
    fn builder_overrides_stick() {
        let config = AuthConfig::new()
            .with_access_token_ttl_minutes(60)
            .with_temp_token_ttl_minutes(2)
            .with_reset_token_ttl_hours(1)
            .with_totp_issuer("Acme".to_string())
            .with_totp_window(2)
            .with_qr_scale(8)
            .with_frontend_base_url("https://app.acme.test".to_string());

        assert_eq!(config.access_token_ttl_minutes(), 60);
        assert_eq!(config.temp_token_ttl_minutes(), 2);
        assert_eq!(config.reset_token_ttl_hours(), 1);
        assert_eq!(config.totp_issuer(), "Acme");
        assert_eq!(config.totp_window(), 2);
        assert_eq!(config.qr_scale(), 8);
        assert_eq!(config.frontend_base_url(), "https://app.acme.test");
    }
}

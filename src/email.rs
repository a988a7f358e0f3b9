//! Email delivery abstraction.
//!
//! The auth flows only ever *trigger* mail: they hand a template key and
//! personalization payload to an [`EmailSender`] and move on. Template
//! rendering and transport (SMTP, provider API) live behind the trait.
//! The default sender for local dev is [`LogEmailSender`], which logs the
//! payload and returns `Ok(())`.

use anyhow::Result;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub template: String,
    pub payload_json: String,
}

/// Delivery abstraction consumed by the auth flows.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error for the caller to surface.
    ///
    /// # Errors
    ///
    /// Implementation-defined delivery failures.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            template = %message.template,
            payload = %message.payload_json,
            "email send stub"
        );
        Ok(())
    }
}

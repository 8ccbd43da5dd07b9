//! Outbound mail: the registration confirmation code and the appeal
//! acknowledgement.

mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::MailConfig;
pub use smtp::SmtpMailer;

const CONFIRMATION_SUBJECT: &str = "Confirmation of registration";
const CODE_MARKER: &str = "Your confirmation code is: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("cannot build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

pub fn confirmation_code_mail(to: &str, name: &str, surname: &str, code: &str) -> OutgoingMail {
    OutgoingMail {
        to: to.to_string(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        body: format!(
            "Hello, {name} {surname}. To register successfully, you need to confirm your mail.\n\n\
             {CODE_MARKER}{code}\n\nBest regards, Interior Visualization Shop"
        ),
    }
}

pub fn appeal_received_mail(to: &str, nickname: &str, subject: &str) -> OutgoingMail {
    OutgoingMail {
        to: to.to_string(),
        subject: subject.to_string(),
        body: format!(
            "Hello, {nickname}. Thank you for contacting us. Your letter on the subject: '{subject}' \
             has been received. It will be reviewed during the day. If you have not received an \
             answer, then contact any messenger convenient for you in the 'Contacts' section.\n\n\
             Best regards, Interior Visualization Shop"
        ),
    }
}

/// Writes mails to the log instead of sending them. Used when no sender
/// account is configured outside production.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(to = %mail.to, subject = %mail.subject, body = %mail.body, "Mail not sent, no SMTP account configured");
        Ok(())
    }
}

pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    if config.address.is_empty() || config.password.is_empty() {
        tracing::warn!("Mail account not configured, mails will only be logged");
        return Ok(Arc::new(LogMailer));
    }

    Ok(Arc::new(SmtpMailer::new(config)?))
}

#[cfg(test)]
pub use recording::RecordingMailer;

use std::sync::Arc;
use std::time::Duration;

use shop_api::{AuthResponse, ConfirmCodeRequest, RegisterRequest};

use super::required;
use super::user::{RegistrationForm, UserService};
use crate::auth::confirmation::{ConfirmationRegistry, generate_code};
use crate::auth::services::AuthService;
use crate::error::AppError;
use crate::mail::{Mailer, confirmation_code_mail};

/// Two-request sign-up: `register` mails a code and waits, `confirm`
/// delivers the code the registrant typed in.
#[derive(Clone)]
pub struct RegistrationService {
    users: UserService,
    auth: AuthService,
    mailer: Arc<dyn Mailer>,
    confirmations: ConfirmationRegistry,
    confirmation_timeout: Duration,
}

impl RegistrationService {
    pub fn new(
        users: UserService,
        auth: AuthService,
        mailer: Arc<dyn Mailer>,
        confirmations: ConfirmationRegistry,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            users,
            auth,
            mailer,
            confirmations,
            confirmation_timeout,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let form = RegistrationForm::parse(request)?;
        self.users.ensure_email_available(&form.email).await?;

        let pending = self.confirmations.open(&form.email)?;
        let attempt_id = pending.attempt_id();
        let code = generate_code();

        let mail = confirmation_code_mail(&form.email, &form.name, &form.surname, &code);
        if let Err(e) = self.mailer.send(mail).await {
            tracing::error!(email = %form.email, %attempt_id, error = %e, "Failed to send confirmation code");
        }

        tracing::info!(email = %pending.email(), %attempt_id, "Waiting for confirmation code");
        let received = pending.wait(self.confirmation_timeout).await?;

        if received != code {
            tracing::warn!(email = %form.email, %attempt_id, "Confirmation code mismatch");
            return Err(AppError::InvalidConfirmationCode);
        }

        self.auth.register(form).await
    }

    /// Returns the delivered code.
    pub fn confirm(&self, request: ConfirmCodeRequest) -> Result<String, AppError> {
        required(&request.code, "code")?;
        let email = self
            .confirmations
            .submit(request.email.as_deref(), &request.code)?;

        tracing::info!(%email, "Confirmation code received");
        Ok(request.code)
    }
}

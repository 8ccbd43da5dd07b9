pub mod appeal;
pub mod registration;
pub mod user;

pub use appeal::{AppealDraft, AppealService};
pub use registration::RegistrationService;
pub use user::{RegistrationForm, UserService};

use crate::error::AppError;

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("empty {field}")));
    }
    Ok(trimmed.to_string())
}

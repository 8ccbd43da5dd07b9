use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use shop_api::AppealResponse;

use crate::app::AppState;
use crate::auth::middleware::AuthenticatedEmail;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::services::AppealDraft;
use crate::services::appeal::UploadedDocument;

#[derive(Default)]
struct AppealForm {
    email: String,
    phone_number: String,
    nickname: String,
    subject: Option<String>,
    message: String,
    document: Option<UploadedDocument>,
}

impl AppealForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "document" => {
                    let file_name = field.file_name().unwrap_or_default().trim().to_string();
                    let bytes = field.bytes().await?;
                    // Only a file part counts; a plain value or an empty file input is no document.
                    if file_name.is_empty() {
                        tracing::debug!(size = bytes.len(), "Ignoring document part without a file name");
                    } else {
                        form.document = Some(UploadedDocument {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                "email" => form.email = field.text().await?,
                "phonenumber" => form.phone_number = field.text().await?,
                "nickname" => form.nickname = field.text().await?,
                "subject" => form.subject = Some(field.text().await?),
                "message" => form.message = field.text().await?,
                other => tracing::debug!(field = other, "Ignoring unknown appeal form field"),
            }
        }

        Ok(form)
    }
}

/// POST /protected/appeal
pub async fn create_appeal(
    State(state): State<AppState>,
    AuthenticatedEmail(caller): AuthenticatedEmail,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AppResponse<AppealResponse>, AppError> {
    let form = AppealForm::read(multipart?).await?;
    let draft = AppealDraft::new(
        &form.email,
        &form.phone_number,
        &form.nickname,
        form.subject.as_deref(),
        &form.message,
    )?;

    tracing::debug!(%caller, email = %draft.email, "Appeal submitted");
    let appeal = state.appeals.submit(draft, form.document).await?;
    Ok(AppResponse::created(appeal.into()))
}

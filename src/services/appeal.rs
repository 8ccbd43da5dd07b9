use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::required;
use crate::db::models::appeal::DEFAULT_SUBJECT;
use crate::db::models::{Appeal, NewAppeal};
use crate::db::repositories::AppealStore;
use crate::error::AppError;
use crate::mail::{Mailer, appeal_received_mail};

/// Checked appeal form fields.
#[derive(Debug, Clone)]
pub struct AppealDraft {
    pub email: String,
    pub phone_number: String,
    pub nickname: String,
    pub subject: String,
    pub message: String,
}

impl AppealDraft {
    pub fn new(
        email: &str,
        phone_number: &str,
        nickname: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<Self, AppError> {
        let subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT);

        Ok(Self {
            email: required(email, "email")?,
            phone_number: required(phone_number, "phonenumber")?,
            nickname: required(nickname, "nickname")?,
            subject: subject.to_string(),
            message: required(message, "message")?,
        })
    }
}

/// An attachment as received in the form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct AppealService {
    store: Arc<dyn AppealStore>,
    mailer: Arc<dyn Mailer>,
    documents_dir: PathBuf,
}

impl AppealService {
    pub fn new(
        store: Arc<dyn AppealStore>,
        mailer: Arc<dyn Mailer>,
        documents_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            mailer,
            documents_dir: documents_dir.into(),
        }
    }

    /// Stores the document, records the appeal and acknowledges it by mail.
    pub async fn submit(
        &self,
        draft: AppealDraft,
        document: Option<UploadedDocument>,
    ) -> Result<Appeal, AppError> {
        let document = match document {
            Some(doc) => self.save_document(&draft.email, doc).await?,
            None => None,
        };

        let appeal = self
            .store
            .create(NewAppeal {
                email: draft.email,
                phone_number: draft.phone_number,
                nickname: draft.nickname,
                subject: Some(draft.subject),
                message: draft.message,
                document,
            })
            .await?;

        tracing::info!(appeal_id = appeal.id, email = %appeal.email, "Appeal created");

        let subject = appeal.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);
        let mail = appeal_received_mail(&appeal.email, &appeal.nickname, subject);
        if let Err(e) = self.mailer.send(mail).await {
            tracing::error!(appeal_id = appeal.id, error = %e, "Failed to send appeal acknowledgement");
        }

        Ok(appeal)
    }

    /// Writes the document next to its siblings. A name without a usable
    /// last component leaves the appeal without a file.
    async fn save_document(
        &self,
        email: &str,
        doc: UploadedDocument,
    ) -> Result<Option<String>, AppError> {
        let Some(file_name) = document_file_name(&doc.file_name) else {
            tracing::warn!(file_name = %doc.file_name, "Unusable document name, storing appeal without a file");
            return Ok(None);
        };
        let path = self
            .documents_dir
            .join(format!("{}{file_name}", email.replace(['/', '\\'], "_")));

        tokio::fs::create_dir_all(&self.documents_dir)
            .await
            .map_err(|e| AppError::internal(format!("error creating document directory: {e}")))?;
        tokio::fs::write(&path, &doc.bytes)
            .await
            .map_err(|e| AppError::internal(format!("error saving document: {e}")))?;

        tracing::debug!(path = %path.display(), size = doc.bytes.len(), "Document saved");
        Ok(Some(path.to_string_lossy().into_owned()))
    }
}

/// Last path component of a client supplied file name.
fn document_file_name(raw: &str) -> Option<&str> {
    let last = raw.rsplit(['/', '\\']).next()?.trim();
    Path::new(last).file_name().map(|_| last)
}

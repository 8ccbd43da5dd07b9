// src/error.rs

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shop_api::ErrorResponse;

use crate::auth::confirmation::ConfirmationError;
use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::db::error::RepositoryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    // === Store errors ===
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Authentication ===
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // === Registration handshake ===
    #[error("The entered code is not correct")]
    InvalidConfirmationCode,
    #[error("Registration pending: {0}")]
    RegistrationPending(String),
    #[error("Confirmation code not received in time")]
    ConfirmationTimeout,

    // === Validation ===
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // === Hashing / signing ===
    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    // === Internal ===
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message, internal_detail) = self.get_error_info();

        if let Some(ref detail) = internal_detail {
            tracing::error!(error_code, %status, detail, "Internal server error");
        }

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details: None,
        });

        (status, body).into_response()
    }
}

impl AppError {
    /// Status, public code, public message and the detail that is only logged.
    fn get_error_info(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            // 404 Not Found
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),

            // 400 Bad Request
            AppError::AlreadyExists(msg) => {
                (StatusCode::BAD_REQUEST, "ALREADY_EXISTS", msg.clone(), None)
            }
            AppError::InvalidPassword => (
                StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIALS",
                "Incorrect password".to_string(),
                None,
            ),
            AppError::InvalidConfirmationCode => (
                StatusCode::BAD_REQUEST,
                "INVALID_MAIL_CODE",
                "the entered code is not correct".to_string(),
                None,
            ),
            AppError::RegistrationPending(msg) => (
                StatusCode::BAD_REQUEST,
                "REGISTRATION_PENDING",
                msg.clone(),
                None,
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone(), None)
            }

            // 401 Unauthorized
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
            }

            // 408 Request Timeout
            AppError::ConfirmationTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "CONFIRMATION_TIMEOUT",
                "The confirmation code was not entered in time".to_string(),
                None,
            ),

            // 500 Internal Server Error
            AppError::PasswordHashingFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASHING_ERROR",
                "An error occurred while processing your request".to_string(),
                Some(msg.clone()),
            ),
            AppError::TokenGenerationFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_ERROR",
                "An error occurred while generating token".to_string(),
                Some(msg.clone()),
            ),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An error occurred with the database".to_string(),
                Some(msg.clone()),
            ),
            AppError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
                Some(msg.clone()),
            ),
        }
    }

    // === Helper constructors ===
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        AppError::AlreadyExists(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::DatabaseError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::InternalServerError(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn hashing_failed(msg: impl Into<String>) -> Self {
        AppError::PasswordHashingFailed(msg.into())
    }

    pub fn token_generation_failed(msg: impl Into<String>) -> Self {
        AppError::TokenGenerationFailed(msg.into())
    }

    #[cfg(test)]
    pub fn status_code(&self) -> StatusCode {
        self.get_error_info().0
    }
}

// === Conversions from layer errors ===

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::not_found(msg),
            RepositoryError::UniqueViolation(msg) => AppError::already_exists(msg),
            RepositoryError::Timeout(after) => {
                AppError::database(format!("query exceeded its deadline of {after:?}"))
            }
            RepositoryError::PoolError(msg) | RepositoryError::DatabaseError(msg) => {
                AppError::database(msg)
            }
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::GenerationFailed(e) => AppError::token_generation_failed(e.to_string()),
            JwtError::VerificationFailed(e) => AppError::unauthorized(format!("bad received token: {e}")),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::hashing_failed(err.to_string())
    }
}

impl From<ConfirmationError> for AppError {
    fn from(err: ConfirmationError) -> Self {
        match err {
            ConfirmationError::AlreadyPending(_) => AppError::RegistrationPending(err.to_string()),
            ConfirmationError::NothingPending => AppError::not_found(err.to_string()),
            ConfirmationError::Ambiguous => AppError::validation(err.to_string()),
            ConfirmationError::TimedOut(_) => AppError::ConfirmationTimeout,
            ConfirmationError::Cancelled => AppError::internal(err.to_string()),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        AppError::invalid_input(format!("Invalid multipart form: {err}"))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::invalid_input(format!("Invalid multipart form: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn not_found_displays_correct_message() {
        let err = AppError::not_found("User");
        assert_eq!(err.to_string(), "Not found: User");
    }

    #[test]
    fn not_found_maps_to_404_status() {
        assert_eq!(
            AppError::not_found("test").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicate_email_maps_to_400_status() {
        let err = AppError::from(RepositoryError::UniqueViolation("taken".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn wrong_confirmation_code_maps_to_400_status() {
        assert_eq!(
            AppError::InvalidConfirmationCode.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unauthorized_maps_to_401_status() {
        assert_eq!(
            AppError::unauthorized("empty auth header").status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn confirmation_timeout_maps_to_408_status() {
        let err = AppError::from(ConfirmationError::TimedOut(Duration::from_secs(1)));
        assert_eq!(err.status_code(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn store_timeout_maps_to_500_status() {
        let err = AppError::from(RepositoryError::Timeout(Duration::from_secs(5)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn internal_error_body_hides_detail() {
        let response = AppError::database("relation \"users\" does not exist").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("relation"));
    }
}

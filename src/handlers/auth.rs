use axum::extract::State;
use shop_api::{AuthResponse, ConfirmCodeRequest, RegisterRequest, SignInRequest};

use crate::app::AppState;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::response::AppResponse;

/// POST /sign_in/mail
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignInRequest>,
) -> Result<AppResponse<AuthResponse>, AppError> {
    let response = state.auth.sign_in(payload).await?;
    Ok(AppResponse::ok(response))
}

/// POST /sign_up
/// Answers only once the mailed code came back through `/sign_up/checkmail`.
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<AppResponse<AuthResponse>, AppError> {
    let response = state.registration.register(payload).await?;
    Ok(AppResponse::created(response))
}

/// POST /sign_up/checkmail
pub async fn check_mail(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ConfirmCodeRequest>,
) -> Result<AppResponse<String>, AppError> {
    let code = state.registration.confirm(payload)?;
    Ok(AppResponse::ok(code))
}

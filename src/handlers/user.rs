use axum::extract::{Path, Query, State};
use shop_api::{MessageResponse, RegisterRequest, UserByEmailQuery, UserResponse};

use crate::app::AppState;
use crate::error::AppError;
use crate::extract::{JsonBody, parse_id};
use crate::response::AppResponse;
use crate::services::RegistrationForm;

/// GET /users/email?email=
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<UserByEmailQuery>,
) -> Result<AppResponse<UserResponse>, AppError> {
    let user = state.users.get_by_email(&query.email).await?;
    Ok(AppResponse::ok(user.into()))
}

/// GET /users/profile/{id}
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<AppResponse<UserResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let user = state.users.get_by_id(id).await?;
    Ok(AppResponse::ok(user.into()))
}

/// POST /users
/// Creates an account directly, without the confirmation handshake.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<AppResponse<UserResponse>, AppError> {
    let form = RegistrationForm::parse(payload)?;
    let user = state.users.create(form).await?;
    Ok(AppResponse::created(user.into()))
}

/// DELETE /users/profile/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<AppResponse<MessageResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    state.users.delete(id).await?;
    Ok(AppResponse::ok(MessageResponse::new(format!(
        "user {id} deleted"
    ))))
}

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::AppError;

const BEARER: &str = "Bearer ";

/// Email of the caller, set by [`require_bearer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedEmail(pub String);

/// Guards the protected routes with an access token.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = match request.headers().get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value
            .to_str()
            .map_err(|_| AppError::unauthorized("invalid auth header"))?,
        _ => return Err(AppError::unauthorized("empty auth header")),
    };

    let token = header_value
        .strip_prefix(BEARER)
        .ok_or_else(|| AppError::unauthorized("invalid auth header"))?;

    let email = state.auth.verify_token(token)?;
    tracing::debug!(%email, "Request authenticated");

    request.extensions_mut().insert(AuthenticatedEmail(email));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedEmail
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedEmail>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("empty auth header"))
    }
}

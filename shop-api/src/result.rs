use serde::{Deserialize, Serialize};

/// Success statuses the API answers with.
/// Kept independent of any HTTP crate so the type stays WASM-friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Generic API response wrapper.
///
/// The backend wraps this in a type that implements Axum's `IntoResponse`.
///
/// ```rust
/// use shop_api::{AppResponse, StatusCode};
///
/// let response = AppResponse::created("new_resource");
/// assert_eq!(response.status, StatusCode::Created);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse<T> {
    pub data: T,
    pub status: StatusCode,
}

impl<T> AppResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self { data, status }
    }

    /// 200 OK
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::Ok, data)
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::Created, data)
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shop_api::{AppResponse as ApiResponse, StatusCode as ApiStatusCode};

/// Axum side of `shop_api::AppResponse`: the data is the JSON body and the
/// status becomes the HTTP status.
pub struct AppResponse<T> {
    inner: ApiResponse<T>,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    pub fn new(inner: ApiResponse<T>) -> Self {
        Self { inner }
    }

    /// 200 OK with data
    pub fn ok(data: T) -> Self {
        Self::new(ApiResponse::ok(data))
    }

    /// 201 Created with data
    pub fn created(data: T) -> Self {
        Self::new(ApiResponse::created(data))
    }
}

fn convert_status(api_status: ApiStatusCode) -> StatusCode {
    match api_status {
        ApiStatusCode::Ok => StatusCode::OK,
        ApiStatusCode::Created => StatusCode::CREATED,
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (convert_status(self.inner.status), Json(self.inner.data)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_api::MessageResponse;

    #[test]
    fn ok_response_keeps_status() {
        let response = AppResponse::ok(MessageResponse::new("done"));
        assert_eq!(response.inner.status, ApiStatusCode::Ok);
    }

    #[test]
    fn status_conversion() {
        assert_eq!(convert_status(ApiStatusCode::Ok), StatusCode::OK);
        assert_eq!(convert_status(ApiStatusCode::Created), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn created_response_serializes_data_as_body() {
        let response = AppResponse::created("1234").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"\"1234\"");
    }
}

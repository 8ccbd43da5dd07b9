//! Request extractors with the error messages the API promises.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body decoded strictly: the body must hold exactly one JSON value,
/// and unknown keys are refused by the target type.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_input(e.body_text()))?;

        decode_strict(&bytes).map(JsonBody)
    }
}

pub fn decode_strict<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::invalid_input("request body must not be empty"));
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(describe)?;
    de.end()
        .map_err(|_| AppError::invalid_input("request body must only contain a single JSON object"))?;
    Ok(value)
}

fn describe(err: serde_json::Error) -> AppError {
    use serde_json::error::Category;

    let message = match err.classify() {
        Category::Syntax => format!(
            "request body contains badly-formed JSON (at line {} column {})",
            err.line(),
            err.column()
        ),
        Category::Eof => "request body contains badly-formed JSON".to_string(),
        Category::Data => {
            let text = err.to_string();
            match unknown_field(&text) {
                Some(field) => format!("request body contains unknown key {field}"),
                None => format!("request body contains an invalid value: {text}"),
            }
        }
        Category::Io => format!("cannot read request body: {err}"),
    };
    AppError::invalid_input(message)
}

/// Pulls the field name out of serde's "unknown field `x`, expected ..." text.
fn unknown_field(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("unknown field `")?;
    rest.split('`').next()
}

/// Path ids are positive 64-bit integers.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_input("id must be a positive integer")),
    }
}

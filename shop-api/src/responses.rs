use serde::{Deserialize, Serialize};

/// Public view of a user. The password hash never leaves the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Returned by sign-in and by a completed registration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub jwt: TokenPair,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppealResponse {
    pub id: i64,
    pub email: String,
    pub phone_number: String,
    pub nickname: String,
    pub subject: String,
    pub message: String,
    pub document: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

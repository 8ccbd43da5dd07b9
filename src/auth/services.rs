use std::sync::Arc;

use shop_api::{AuthResponse, SignInRequest, UserResponse};

use super::jwt::JwtManager;
use super::password::PasswordManager;
use crate::db::models::User;
use crate::error::AppError;
use crate::services::{RegistrationForm, UserService, required};

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(users: UserService, jwt: Arc<JwtManager>) -> Self {
        Self { users, jwt }
    }

    /// Unknown email is `NotFound`; a wrong password is `InvalidPassword`.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<AuthResponse, AppError> {
        let email = required(&request.email, "email")?;
        required(&request.password, "password")?;

        let user = self.users.get_by_email(&email).await?;

        if !PasswordManager::verify_async(request.password, user.password.clone()).await? {
            tracing::warn!(user_id = user.id, "Sign-in with incorrect password");
            return Err(AppError::InvalidPassword);
        }

        tracing::info!(user_id = user.id, "User signed in");
        self.authenticated(user)
    }

    /// Creates the account of a confirmed registrant and signs them in.
    pub async fn register(&self, form: RegistrationForm) -> Result<AuthResponse, AppError> {
        let user = self.users.create(form).await?;
        self.authenticated(user)
    }

    /// Returns the email carried by a valid access token.
    pub fn verify_token(&self, token: &str) -> Result<String, AppError> {
        Ok(self.jwt.verify_access(token)?.email)
    }

    fn authenticated(&self, user: User) -> Result<AuthResponse, AppError> {
        let jwt = self.jwt.issue_pair(&user)?;
        Ok(AuthResponse {
            user: UserResponse::from(user),
            jwt,
        })
    }
}

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shop_api::TokenPair;

use crate::config::JwtConfig;
use crate::db::models::User;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(jsonwebtoken::errors::Error),
    #[error("Token verification failed: {0}")]
    VerificationFailed(jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RefreshClaims {
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Signs access tokens and refresh tokens with separate HMAC secrets.
#[derive(Clone)]
pub struct JwtManager {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtManager {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.access_token_secret_key,
            &config.refresh_token_secret_key,
            Duration::minutes(config.access_expiration_minutes),
            Duration::days(config.refresh_expiration_days),
        )
    }

    pub fn issue_access(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = AccessClaims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(JwtError::GenerationFailed)
    }

    pub fn issue_refresh(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            id: user.id,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(JwtError::GenerationFailed)
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access(user)?,
            refresh_token: self.issue_refresh(user)?,
        })
    }

    /// Accepts any HMAC-signed access token that is unexpired.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

        decode::<AccessClaims>(token, &self.access_decoding, &validation)
            .map(|data| data.claims)
            .map_err(JwtError::VerificationFailed)
    }
}

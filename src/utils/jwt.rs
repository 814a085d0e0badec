use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    db::{User, UserId},
    error::AppResult,
};

pub type AuthToken = String;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub user_id: UserId,
}

/// Issues auth tokens and resolves them back to user ids.
#[async_trait]
pub trait AuthTokenGenerator: Send + Sync {
    async fn generate_token(&self, user: &User) -> AppResult<AuthToken>;

    /// Returns `None` for malformed, forged or expired tokens.
    async fn get_user_id(&self, token: &str) -> Option<UserId>;
}

#[derive(Clone)]
pub struct JwtAuthTokenGenerator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

impl JwtAuthTokenGenerator {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    pub fn new(secret_key: &str, expiration: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            expiration,
        }
    }

    pub fn verify_jwt(&self, token: &str) -> AppResult<Claims> {
        let claims = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Self::ALGORITHM),
        )?
        .claims;
        Ok(claims)
    }
}

#[async_trait]
impl AuthTokenGenerator for JwtAuthTokenGenerator {
    async fn generate_token(&self, user: &User) -> AppResult<AuthToken> {
        let exp = i64::try_from(self.expiration.as_secs())
            .ok()
            .and_then(|secs| chrono::Utc::now().timestamp().checked_add(secs))
            .ok_or_else(|| anyhow::anyhow!("token expiration is out of range"))?;
        let claims = Claims {
            exp,
            user_id: user.id,
        };
        let header = Header::new(Self::ALGORITHM);
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;
        Ok(token)
    }

    async fn get_user_id(&self, token: &str) -> Option<UserId> {
        match self.verify_jwt(token) {
            Ok(claims) => Some(claims.user_id),
            Err(err) => {
                log::info!("invalid JWT: {:?}", err);
                None
            }
        }
    }
}

use crate::auth::{TokenIssuer, authorities::authorities};
use crate::core::errors::StorefrontError;
use crate::core::models::user::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Username
    pub uid: Uuid,
    pub roles: Vec<String>,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

pub struct JwtService {
    secret: String,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: String, issuer: String, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        JwtService {
            secret,
            issuer,
            access_ttl,
            refresh_ttl,
        }
    }

    fn generate_token(&self, user: &User, token_type: TokenType, ttl: Duration) -> Result<String, StorefrontError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id,
            roles: authorities(user),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| StorefrontError::InternalServerError(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, StorefrontError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| StorefrontError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Like [`validate_token`](Self::validate_token) but rejects refresh tokens.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, StorefrontError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(StorefrontError::Unauthorized("Refresh token cannot be used for access".to_string()));
        }
        Ok(claims)
    }
}

impl TokenIssuer for JwtService {
    fn issue_access(&self, user: &User) -> Result<String, StorefrontError> {
        self.generate_token(user, TokenType::Access, self.access_ttl)
    }

    fn issue_refresh(&self, user: &User) -> Result<String, StorefrontError> {
        self.generate_token(user, TokenType::Refresh, self.refresh_ttl)
    }
}

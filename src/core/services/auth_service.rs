use crate::auth::authorities::{check_post_authentication, check_pre_authentication};
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::core::errors::StorefrontError;
use crate::core::models::user::{Registration, Role, User};
use crate::infrastructure::metrics;
use crate::infrastructure::storage::UserStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub user_info: UserInfo,
}

pub struct AuthService<S: UserStore, H: PasswordHasher, T: TokenIssuer> {
    storage: S,
    hasher: H,
    tokens: T,
}

impl<S: UserStore, H: PasswordHasher, T: TokenIssuer> AuthService<S, H, T> {
    pub fn new(storage: S, hasher: H, tokens: T) -> Self {
        AuthService {
            storage,
            hasher,
            tokens,
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<AuthTokens, StorefrontError> {
        info!("Registering new user: {}", registration.username);

        if self.storage.exists_by_username(&registration.username).await? {
            return Err(StorefrontError::Validation("Username already exists".to_string()));
        }
        if self.storage.exists_by_email(&registration.email).await? {
            return Err(StorefrontError::Validation("Email already exists".to_string()));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let user = User::new(
            registration.username,
            registration.email,
            password_hash,
            registration.full_name,
            Role::User,
        );
        let saved = self.storage.save_user(user).await?;
        metrics::record_user_registered();

        info!("User registered successfully: {}", saved.username);
        self.issue_tokens(&saved)
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthTokens, StorefrontError> {
        info!("Authenticating user: {}", username);

        let user = self
            .storage
            .find_by_username(username)
            .await?
            .ok_or(StorefrontError::InvalidCredentials)?;

        check_pre_authentication(&user)?;
        if !self.hasher.verify(password, &user.password_hash)? {
            warn!("Rejected login for {}: bad credentials", username);
            return Err(StorefrontError::InvalidCredentials);
        }
        check_post_authentication(&user)?;
        metrics::record_user_login();

        info!("User authenticated successfully: {}", user.username);
        self.issue_tokens(&user)
    }

    fn issue_tokens(&self, user: &User) -> Result<AuthTokens, StorefrontError> {
        Ok(AuthTokens {
            access_token: self.tokens.issue_access(user)?,
            refresh_token: self.tokens.issue_refresh(user)?,
            token_type: "Bearer".to_string(),
            user_info: UserInfo {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                full_name: user.full_name.clone(),
                role: user.role.as_str().to_string(),
            },
        })
    }
}

pub mod authorities;
pub mod jwt;
pub mod password;

use crate::core::errors::StorefrontError;
use crate::core::models::user::User;
use std::sync::Arc;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> Result<String, StorefrontError>;
    fn verify(&self, raw: &str, hash: &str) -> Result<bool, StorefrontError>;
}

/// Issues the access/refresh token pair for an authenticated user.
pub trait TokenIssuer: Send + Sync {
    fn issue_access(&self, user: &User) -> Result<String, StorefrontError>;
    fn issue_refresh(&self, user: &User) -> Result<String, StorefrontError>;
}

impl<T: TokenIssuer + ?Sized> TokenIssuer for Arc<T> {
    fn issue_access(&self, user: &User) -> Result<String, StorefrontError> {
        (**self).issue_access(user)
    }

    fn issue_refresh(&self, user: &User) -> Result<String, StorefrontError> {
        (**self).issue_refresh(user)
    }
}

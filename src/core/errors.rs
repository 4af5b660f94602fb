use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

/// How an error surfaces to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Authentication,
    Infrastructure,
}

#[derive(Error, Debug, Serialize)]
pub enum StorefrontError {
    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{}`: {}", .0, .1.description)]
    InvalidInput(String, FieldError),

    /// Request-level validation failure (duplicates, paging, ranges)
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found with {field}: '{value}'")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User account is disabled")]
    AccountDisabled,
    #[error("User account is locked")]
    AccountLocked,
    #[error("User account has expired")]
    AccountExpired,
    #[error("User credentials have expired")]
    CredentialsExpired,

    /// Missing, malformed or rejected bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl StorefrontError {
    pub fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        StorefrontError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description: description.into(),
            },
        )
    }

    pub fn product_not_found(id: impl ToString) -> Self {
        StorefrontError::NotFound {
            entity: "Product",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            StorefrontError::InvalidInput(..) | StorefrontError::Validation(_) => ErrorCategory::Validation,
            StorefrontError::NotFound { .. } => ErrorCategory::NotFound,
            StorefrontError::InvalidCredentials
            | StorefrontError::AccountDisabled
            | StorefrontError::AccountLocked
            | StorefrontError::AccountExpired
            | StorefrontError::CredentialsExpired
            | StorefrontError::Unauthorized(_) => ErrorCategory::Authentication,
            StorefrontError::StorageError(_)
            | StorefrontError::CacheError(_)
            | StorefrontError::InternalServerError(_) => ErrorCategory::Infrastructure,
        }
    }
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use log::error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::core::errors::{ErrorCategory, StorefrontError};
use crate::core::models::{page::Page, product::ProductDraft, user::Registration};

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";

/// Envelope wrapping every body the API returns. Absent fields are omitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Operation completed successfully")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl<T> ApiResponse<T> {
    fn build(status: &str, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            data,
            timestamp: Utc::now(),
            total_count: None,
            page_number: None,
            page_size: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::build(STATUS_SUCCESS, message, Some(data))
    }

    /// Success without a payload, e.g. after a delete.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::build(STATUS_SUCCESS, message, None)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::build(STATUS_ERROR, message, None)
    }
}

impl<T> ApiResponse<Page<T>> {
    pub fn paginated(page: Page<T>, message: impl Into<String>) -> Self {
        let total_count = page.total_elements;
        let page_number = page.number;
        let page_size = page.size;
        Self {
            total_count: Some(total_count),
            page_number: Some(page_number),
            page_size: Some(page_size),
            ..Self::build(STATUS_SUCCESS, message, Some(page))
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }
    Ok(())
}

// Request structs for JSON payloads
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[schema(example = "iPhone 15")]
    #[validate(custom(function = "not_blank", message = "Product name is required"))]
    pub name: String,
    #[schema(example = "Latest iPhone model")]
    pub description: Option<String>,
    #[schema(value_type = f64, example = 999.99)]
    #[validate(required(message = "Product price is required"))]
    pub price: Option<Decimal>,
}

impl ProductRequest {
    /// Only meaningful after validation, which guarantees a price.
    pub fn into_draft(self) -> Result<ProductDraft, StorefrontError> {
        let price = self
            .price
            .ok_or_else(|| StorefrontError::invalid_input("price", "Missing Price", "Product price is required"))?;
        Ok(ProductDraft {
            name: self.name,
            description: self.description,
            price,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "john_doe")]
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[schema(example = "john@example.com")]
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
    #[schema(example = "password123")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[schema(example = "John Doe")]
    #[validate(custom(function = "not_blank", message = "Full name is required"))]
    pub full_name: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthRequest {
    #[schema(example = "john_doe")]
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[schema(example = "password123")]
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (0-based)
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    #[param(example = 10)]
    pub size: u32,
    /// One of `id`, `name`, `price`, `createdAt`, `updatedAt`
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// `ASC` or `DESC`
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

fn default_size() -> u32 {
    10
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_dir() -> String {
    "ASC".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive name fragment
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PriceRangeParams {
    #[param(value_type = f64)]
    pub min_price: Decimal,
    #[param(value_type = f64)]
    pub max_price: Decimal,
}

// Newtype wrapper for StorefrontError to implement IntoResponse
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self.0.category() {
            ErrorCategory::Validation => {
                let message = match &self.0 {
                    StorefrontError::InvalidInput(_, field) => field.description.clone(),
                    other => other.to_string(),
                };
                (StatusCode::BAD_REQUEST, message)
            }
            ErrorCategory::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            ErrorCategory::Authentication => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            ErrorCategory::Infrastructure => {
                error!("Request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };
        (status, Json(ApiResponse::<EmptyData>::error(message))).into_response()
    }
}

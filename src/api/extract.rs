//! `ApiPath<T>` and `ApiQuery<T>` behave like axum's `Path` and `Query` but
//! reject through [`ApiError`], so malformed ids and query strings answer with
//! the error envelope instead of axum's plain-text body.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::models::ApiError;
use crate::core::errors::StorefrontError;

pub struct ApiPath<T>(pub T);

pub struct ApiQuery<T>(pub T);

// Client mistakes become 400s. A route/extractor mismatch stays a 500.
fn rejection_error(status: StatusCode, body_text: String) -> ApiError {
    if status.is_server_error() {
        ApiError(StorefrontError::InternalServerError(body_text))
    } else {
        ApiError(StorefrontError::Validation(body_text))
    }
}

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;
        Ok(ApiPath(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::header;
use std::time::Instant;

use super::{AppState, models::ApiError};
use crate::core::errors::StorefrontError;

/// Validates the bearer access token and stores its `Claims` in the request
/// extensions.
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| StorefrontError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| StorefrontError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = state.jwt.validate_access_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Label for requests that reached no route, so arbitrary paths cannot mint
/// new metric series.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// The route template (`/api/v1/products/{id}`) or [`UNMATCHED_ROUTE`].
pub fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |mp| mp.as_str().to_string())
}

/// Records `http_requests_total` and `http_request_duration_seconds`,
/// labelled by method and matched route.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = route_label(&request);

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(duration);

    response
}

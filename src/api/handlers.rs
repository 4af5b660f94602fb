use crate::{
    api::{
        AppState,
        extract::{ApiPath, ApiQuery},
        middleware::require_access_token,
        models::*,
        validated_json::ValidatedJson,
    },
    auth::jwt::Claims,
    core::{
        models::{
            page::{Page, PageRequest, ProductSortField, Sort, SortDirection},
            product::ProductResponse,
        },
        services::AuthTokens,
    },
    infrastructure::metrics::render_metrics,
};
use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use log::debug;
use serde::Serialize;
use std::time::Instant;
use utoipa::ToSchema;
use uuid::Uuid;

// Define API routes, relative to `/api/v1`
pub fn api_routes(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/products", post(create_product))
        .route(
            "/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_access_token));

    Router::new()
        .route("/products", get(list_products))
        .route("/products/paginated", get(list_products_paginated))
        .route("/products/search", get(search_products))
        .route("/products/price-range", get(products_by_price_range))
        .route("/products/{id}", get(get_product))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Product",
    responses(
        (status = 200, description = "Successfully retrieved all products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ApiResponse<EmptyData>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state.products.list_active().await?;
    Ok(Json(ApiResponse::success_with_message(
        products,
        "Products retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/paginated",
    tag = "Product",
    params(PaginationParams),
    responses(
        (status = 200, description = "Successfully retrieved paginated products", body = ApiResponse<Page<ProductResponse>>),
        (status = 400, description = "Invalid page size or sort field", body = ApiResponse<EmptyData>)
    )
)]
pub async fn list_products_paginated(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<Page<ProductResponse>>>, ApiError> {
    let sort = Sort {
        field: params.sort_by.parse::<ProductSortField>()?,
        direction: SortDirection::parse(&params.sort_dir),
    };
    let request = PageRequest::new(params.page, params.size, sort)?;
    let page = state.products.list_active_paginated(request).await?;
    Ok(Json(ApiResponse::paginated(page, "Products retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/search",
    tag = "Product",
    params(SearchParams),
    responses(
        (status = 200, description = "Products whose name contains the term", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, description = "Blank search term", body = ApiResponse<EmptyData>)
    )
)]
pub async fn search_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state.products.search_by_name(&params.name).await?;
    Ok(Json(ApiResponse::success_with_message(
        products,
        "Products retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/price-range",
    tag = "Product",
    params(PriceRangeParams),
    responses(
        (status = 200, description = "Products priced within the inclusive range", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, description = "Invalid range", body = ApiResponse<EmptyData>)
    )
)]
pub async fn products_by_price_range(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PriceRangeParams>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state
        .products
        .list_by_price_range(params.min_price, params.max_price)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        products,
        "Products retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Product",
    params(
        ("id" = Uuid, Path, description = "ID of the product to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the product", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ApiResponse<EmptyData>)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let product = state.products.get(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        product,
        "Product retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Product",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid product data provided", body = ApiResponse<EmptyData>),
        (status = 401, description = "Missing or invalid access token", body = ApiResponse<EmptyData>)
    ),
    security(("Bearer" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("{} is creating a product", claims.sub);
    let product = state.products.create(req.into_draft()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(product, "Product created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Product",
    params(
        ("id" = Uuid, Path, description = "ID of the product to update")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid product data provided", body = ApiResponse<EmptyData>),
        (status = 401, description = "Missing or invalid access token", body = ApiResponse<EmptyData>),
        (status = 404, description = "Product not found", body = ApiResponse<EmptyData>)
    ),
    security(("Bearer" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    debug!("{} is updating product {}", claims.sub, id);
    let product = state.products.update(id, req.into_draft()?).await?;
    Ok(Json(ApiResponse::success_with_message(
        product,
        "Product updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Product",
    params(
        ("id" = Uuid, Path, description = "ID of the product to delete")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<EmptyData>),
        (status = 401, description = "Missing or invalid access token", body = ApiResponse<EmptyData>),
        (status = 404, description = "Product not found", body = ApiResponse<EmptyData>)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    debug!("{} is deleting product {}", claims.sub, id);
    state.products.delete(id).await?;
    Ok(Json(ApiResponse::message_only("Product deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthTokens>),
        (status = 400, description = "Invalid registration data or user already exists", body = ApiResponse<EmptyData>)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state.auth.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(tokens, "User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "User authenticated successfully", body = ApiResponse<AuthTokens>),
        (status = 401, description = "Invalid credentials", body = ApiResponse<EmptyData>)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<Json<ApiResponse<AuthTokens>>, ApiError> {
    let tokens = state.auth.authenticate(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::success_with_message(
        tokens,
        "User authenticated successfully",
    )))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: ComponentHealth,
    pub cache: ComponentHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

impl ComponentHealth {
    fn from_ping<E>(result: Result<(), E>, started: Instant) -> Self {
        match result {
            Ok(()) => ComponentHealth {
                status: "ok".to_string(),
                latency_ms: Some(started.elapsed().as_millis() as u64),
            },
            Err(_) => ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            },
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage_start = Instant::now();
    let storage = ComponentHealth::from_ping(state.products.ping_storage().await, storage_start);
    let cache_start = Instant::now();
    let cache = ComponentHealth::from_ping(state.products.ping_cache().await, cache_start);

    let healthy = storage.is_ok() && cache.is_ok();
    let http_status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            storage,
            cache,
        }),
    )
}

/// Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    match render_metrics() {
        Some(body) => (
            StatusCode::OK,
            [(http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics recorder not installed".to_string(),
        ),
    }
}

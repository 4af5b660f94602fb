pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod validated_json;

use axum::{Router, middleware as axum_middleware, routing::get};
use std::sync::Arc;
use std::time::Instant;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{jwt::JwtService, password::BcryptHasher};
use crate::core::services::{AuthService, ProductService};
use crate::infrastructure::cache::SharedCache;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub use handlers::api_routes;
use middleware::http_metrics_middleware;
use openapi::ApiDoc;

pub type AppProductService = ProductService<InMemoryStorage, SharedCache>;
pub type AppAuthService = AuthService<InMemoryStorage, BcryptHasher, Arc<JwtService>>;

/// Shared handler state. Both services see the same storage.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<AppProductService>,
    pub auth: Arc<AppAuthService>,
    pub jwt: Arc<JwtService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(storage: InMemoryStorage, cache: SharedCache, hasher: BcryptHasher, jwt: JwtService) -> Self {
        let jwt = Arc::new(jwt);
        AppState {
            products: Arc::new(ProductService::new(storage.clone(), cache)),
            auth: Arc::new(AuthService::new(storage, hasher, jwt.clone())),
            jwt,
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// Full application router: `/api/v1`, health, metrics and Swagger UI.
pub fn router(state: AppState) -> Router {
    let swagger_routes = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state.clone())
        .nest("/api/v1", api_routes(state))
        .merge(swagger_routes)
        .layer(axum_middleware::from_fn(http_metrics_middleware))
}

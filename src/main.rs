use axum::http::{Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use storefront::{
    AppState, InMemoryCache, InMemoryStorage,
    auth::{jwt::JwtService, password::BcryptHasher},
    config::{CONFIG, CacheBackendKind},
    infrastructure::{cache::SharedCache, metrics},
    router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn build_cache() -> SharedCache {
    let ttl = CONFIG.cache_ttl();
    match CONFIG.cache_backend {
        CacheBackendKind::Memory => Arc::new(InMemoryCache::with_ttl(ttl)),
        #[cfg(feature = "redis-cache")]
        CacheBackendKind::Redis => {
            match storefront::infrastructure::cache::redis_cache::RedisCache::from_url(&CONFIG.redis_url, ttl) {
                Ok(cache) => Arc::new(cache),
                Err(e) => {
                    warn!("Redis cache unavailable ({}), falling back to in-memory cache", e);
                    Arc::new(InMemoryCache::with_ttl(ttl))
                }
            }
        }
        #[cfg(not(feature = "redis-cache"))]
        CacheBackendKind::Redis => {
            warn!("CACHE_BACKEND=redis requires the `redis-cache` feature, using in-memory cache");
            Arc::new(InMemoryCache::with_ttl(ttl))
        }
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let filter = EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("Starting with {:?}", *CONFIG);

    metrics::init_prometheus();

    let storage = InMemoryStorage::new();
    let cache = build_cache();
    let jwt = JwtService::new(
        CONFIG.jwt_secret.clone(),
        CONFIG.jwt_issuer.clone(),
        chrono::Duration::seconds(CONFIG.jwt_expiration_secs),
        chrono::Duration::seconds(CONFIG.jwt_refresh_expiration_secs),
    );
    let state = AppState::new(storage, cache, BcryptHasher::new(CONFIG.bcrypt_cost), jwt);

    let app = router(state)
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(CONFIG.request_timeout_secs)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr: SocketAddr = format!("{}:{}", CONFIG.host, CONFIG.port).parse()?;
    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

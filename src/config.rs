use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Memory,
    Redis,
}

impl FromStr for CacheBackendKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(CacheBackendKind::Memory),
            "redis" => Ok(CacheBackendKind::Redis),
            other => Err(format!("unknown cache backend: {}", other)),
        }
    }
}

pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expiration_secs: i64,
    pub jwt_refresh_expiration_secs: i64,
    pub bcrypt_cost: u32,
    pub cache_backend: CacheBackendKind,
    pub cache_ttl_secs: u64,
    pub redis_url: String,
    pub request_timeout_secs: u64,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_expiration_secs", &self.jwt_expiration_secs)
            .field("jwt_refresh_expiration_secs", &self.jwt_refresh_expiration_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cache_backend", &self.cache_backend)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("redis_url", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()), // Use a secure secret in production
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "storefront".to_string()),
            jwt_expiration_secs: parsed("JWT_EXPIRATION_SECS", 86_400),
            jwt_refresh_expiration_secs: parsed("JWT_REFRESH_EXPIRATION_SECS", 604_800),
            bcrypt_cost: parsed("BCRYPT_COST", bcrypt::DEFAULT_COST),
            cache_backend: parsed("CACHE_BACKEND", CacheBackendKind::Memory),
            cache_ttl_secs: parsed("CACHE_TTL_SECS", 600),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS", 30),
        }
    }

    /// `None` when `CACHE_TTL_SECS=0`.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

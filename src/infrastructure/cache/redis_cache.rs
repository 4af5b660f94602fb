//! Redis cache backend, enabled with the `redis-cache` feature.
//!
//! Evictions run synchronously (SCAN + DEL per namespace) so a mutation has
//! finished invalidating before it returns.

use crate::core::errors::StorefrontError;
use crate::infrastructure::cache::{Cache, cache_keys::namespace_prefix};
use async_trait::async_trait;
use deadpool_redis::{Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

const SCAN_BATCH: usize = 200;

#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    ttl: Option<Duration>,
}

impl RedisCache {
    pub fn new(pool: Pool, ttl: Option<Duration>) -> Self {
        RedisCache { pool, ttl }
    }

    pub fn from_url(url: &str, ttl: Option<Duration>) -> Result<Self, StorefrontError> {
        let pool = deadpool_redis::Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StorefrontError::CacheError(format!("Failed to create Redis pool: {}", e)))?;
        Ok(Self::new(pool, ttl))
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, StorefrontError> {
        self.pool
            .get()
            .await
            .map_err(|e| StorefrontError::CacheError(format!("Failed to get Redis connection: {}", e)))
    }
}

/// SCAN pattern for one namespace. `product::*` never matches `products::all`.
fn scan_pattern(namespace: &str) -> String {
    format!("{}*", namespace_prefix(namespace))
}

/// `SET EX` rejects zero, so sub-second TTLs round up to one second.
fn expiry_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn redis_error(e: redis::RedisError) -> StorefrontError {
    StorefrontError::CacheError(e.to_string())
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorefrontError> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<Vec<u8>>>(key).await.map_err(redis_error)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorefrontError> {
        let mut conn = self.connection().await?;
        match self.ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, expiry_secs(ttl))
                .await
                .map_err(redis_error),
            None => conn.set::<_, _, ()>(key, value).await.map_err(redis_error),
        }
    }

    async fn evict_namespace(&self, namespaces: &[&str]) -> Result<(), StorefrontError> {
        let mut conn = self.connection().await?;
        for namespace in namespaces {
            let pattern = scan_pattern(namespace);
            let mut cursor: u64 = 0;
            loop {
                let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(&pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query_async(&mut conn)
                    .await
                    .map_err(redis_error)?;
                if !keys.is_empty() {
                    conn.del::<_, ()>(keys).await.map_err(redis_error)?;
                }
                if next == 0 {
                    break;
                }
                cursor = next;
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorefrontError> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await.map_err(redis_error)?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(StorefrontError::CacheError(format!("Unexpected PING reply: {}", pong)))
        }
    }
}

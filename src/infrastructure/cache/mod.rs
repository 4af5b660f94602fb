pub mod aside;
pub mod cache_keys;
pub mod in_memory;
#[cfg(feature = "redis-cache")]
pub mod redis_cache;

use crate::core::errors::StorefrontError;
use async_trait::async_trait;
use std::sync::Arc;

/// Byte-oriented lookaside cache. Keys have the form `{namespace}::{key}`.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorefrontError>;
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorefrontError>;
    /// Removes every entry whose key belongs to one of `namespaces`.
    async fn evict_namespace(&self, namespaces: &[&str]) -> Result<(), StorefrontError>;
    async fn ping(&self) -> Result<(), StorefrontError> {
        Ok(())
    }
}

/// Backend chosen at startup.
pub type SharedCache = Arc<dyn Cache>;

#[async_trait]
impl<T: Cache + ?Sized> Cache for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorefrontError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorefrontError> {
        (**self).set(key, value).await
    }

    async fn evict_namespace(&self, namespaces: &[&str]) -> Result<(), StorefrontError> {
        (**self).evict_namespace(namespaces).await
    }

    async fn ping(&self) -> Result<(), StorefrontError> {
        (**self).ping().await
    }
}

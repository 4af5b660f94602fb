//! Cache-aside helpers used by the services.
//!
//! Reads go through the cache and fall back to the loader on a miss; writes
//! evict whole namespaces instead of updating entries in place. Cache failures
//! are logged and treated as misses, they never fail the caller.

use crate::core::errors::StorefrontError;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::metrics;
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;

/// Returns the cached value under `key`, or runs `load` and stores its result.
/// Errors from `load` are returned as-is and never cached.
pub async fn read_through<C, T, F, Fut>(cache: &C, key: &str, load: F) -> Result<T, StorefrontError>
where
    C: Cache + ?Sized,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, StorefrontError>>,
{
    match cache.get(key).await {
        Ok(Some(bytes)) => match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => {
                debug!("Cache hit for {}", key);
                metrics::record_cache_hit();
                return Ok(value);
            }
            Err(e) => warn!("Discarding undecodable cache entry {}: {}", key, e),
        },
        Ok(None) => debug!("Cache miss for {}", key),
        Err(e) => warn!("Cache read failed for {}, falling back to storage: {}", key, e),
    }
    metrics::record_cache_miss();

    let value = load().await?;
    match serde_json::to_vec(&value) {
        Ok(bytes) => {
            if let Err(e) = cache.set(key, bytes).await {
                warn!("Failed to populate cache entry {}: {}", key, e);
            }
        }
        Err(e) => warn!("Failed to encode cache entry {}: {}", key, e),
    }
    Ok(value)
}

/// Evicts `namespaces` once. A failure leaves stale entries behind and is
/// only logged; the durable write that preceded it stands.
pub async fn evict<C>(cache: &C, namespaces: &[&str])
where
    C: Cache + ?Sized,
{
    match cache.evict_namespace(namespaces).await {
        Ok(()) => debug!("Evicted cache namespaces {:?}", namespaces),
        Err(e) => {
            warn!("Cache eviction failed for {:?}: {}", namespaces, e);
            metrics::record_cache_eviction_failure();
        }
    }
}

use crate::core::errors::StorefrontError;
use crate::infrastructure::cache::{Cache, cache_keys::namespace_prefix};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<HashMap<String, (Vec<u8>, Option<Instant>)>>>,
    ttl: Option<Duration>,
}

impl InMemoryCache {
    /// Entries never expire.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        InMemoryCache {
            store: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorefrontError> {
        let store = self.store.read().await;
        match store.get(key) {
            Some((value, expiry)) if expiry.is_none_or(|e| e > Instant::now()) => Ok(Some(value.clone())),
            Some(_) => {
                drop(store); // Release read lock before acquiring write lock
                let mut store = self.store.write().await;
                store.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorefrontError> {
        let expiry = self.ttl.map(|ttl| Instant::now() + ttl);
        let mut store = self.store.write().await;
        store.insert(key.to_string(), (value, expiry));
        Ok(())
    }

    async fn evict_namespace(&self, namespaces: &[&str]) -> Result<(), StorefrontError> {
        let prefixes: Vec<String> = namespaces.iter().map(|ns| namespace_prefix(ns)).collect();
        let mut store = self.store.write().await;
        store.retain(|key, _| !prefixes.iter().any(|prefix| key.starts_with(prefix.as_str())));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn evicts_only_named_namespaces() {
        let cache = InMemoryCache::new();
        cache.set("products::all", b"[]".to_vec()).await.unwrap();
        cache.set("product::1", b"{}".to_vec()).await.unwrap();
        cache.set("productivity::1", b"{}".to_vec()).await.unwrap();

        cache.evict_namespace(&["products", "product"]).await.unwrap();

        assert!(cache.get("products::all").await.unwrap().is_none());
        assert!(cache.get("product::1").await.unwrap().is_none());
        assert_eq!(cache.get("productivity::1").await.unwrap(), Some(b"{}".to_vec()));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = InMemoryCache::with_ttl(Some(Duration::from_secs(60)));
        cache.set("product::1", b"{}".to_vec()).await.unwrap();
        assert!(cache.get("product::1").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.get("product::1").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }
}

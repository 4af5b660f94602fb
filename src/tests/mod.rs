mod auth_tests;
mod product_tests;

use crate::auth::{jwt::JwtService, password::BcryptHasher};
use crate::core::errors::StorefrontError;
use crate::core::models::page::Sort;
use crate::core::models::product::{Product, ProductDraft};
use crate::core::models::user::User;
use crate::core::services::{AuthService, ProductService};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::infrastructure::storage::{ProductStore, UserStore};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory store that counts writes.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemoryStorage,
    product_saves: Arc<AtomicUsize>,
    user_saves: Arc<AtomicUsize>,
}

impl RecordingStore {
    pub fn product_saves(&self) -> usize {
        self.product_saves.load(Ordering::SeqCst)
    }

    pub fn user_saves(&self) -> usize {
        self.user_saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for RecordingStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StorefrontError> {
        self.inner.find_by_id(id).await
    }

    async fn find_active(&self) -> Result<Vec<Product>, StorefrontError> {
        self.inner.find_active().await
    }

    async fn find_active_paginated(
        &self,
        offset: u64,
        limit: u32,
        sort: &Sort,
    ) -> Result<(Vec<Product>, u64), StorefrontError> {
        self.inner.find_active_paginated(offset, limit, sort).await
    }

    async fn search_active_by_name(&self, fragment: &str) -> Result<Vec<Product>, StorefrontError> {
        self.inner.search_active_by_name(fragment).await
    }

    async fn find_active_by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Product>, StorefrontError> {
        self.inner.find_active_by_price_range(min, max).await
    }

    async fn save_product(&self, product: Product) -> Result<Product, StorefrontError> {
        self.product_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_product(product).await
    }
}

#[async_trait]
impl UserStore for RecordingStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StorefrontError> {
        self.inner.exists_by_username(username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StorefrontError> {
        self.inner.exists_by_email(email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorefrontError> {
        self.inner.find_by_username(username).await
    }

    async fn save_user(&self, user: User) -> Result<User, StorefrontError> {
        self.user_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_user(user).await
    }
}

/// Cache whose every operation fails.
pub struct FailingCache;

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorefrontError> {
        Err(StorefrontError::CacheError("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<(), StorefrontError> {
        Err(StorefrontError::CacheError("connection refused".to_string()))
    }

    async fn evict_namespace(&self, _namespaces: &[&str]) -> Result<(), StorefrontError> {
        Err(StorefrontError::CacheError("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StorefrontError> {
        Err(StorefrontError::CacheError("connection refused".to_string()))
    }
}

pub fn test_jwt() -> JwtService {
    JwtService::new(
        "test-secret".to_string(),
        "storefront".to_string(),
        chrono::Duration::hours(24),
        chrono::Duration::days(7),
    )
}

pub fn create_test_product_service() -> (ProductService<RecordingStore, InMemoryCache>, RecordingStore, InMemoryCache) {
    init_logging();
    let storage = RecordingStore::default();
    let cache = InMemoryCache::new();
    let service = ProductService::new(storage.clone(), cache.clone());
    (service, storage, cache)
}

pub fn create_test_auth_service() -> (AuthService<RecordingStore, BcryptHasher, JwtService>, RecordingStore) {
    init_logging();
    let storage = RecordingStore::default();
    // Minimum bcrypt cost keeps the suite fast
    let service = AuthService::new(storage.clone(), BcryptHasher::new(4), test_jwt());
    (service, storage)
}

pub fn draft(name: &str, price: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: None,
        price: price.parse().unwrap(),
    }
}

use crate::core::errors::StorefrontError;
use crate::core::models::{page::Sort, product::Product, user::User};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Looks up a product regardless of its `is_active` flag.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StorefrontError>;
    /// Active products in creation order.
    async fn find_active(&self) -> Result<Vec<Product>, StorefrontError>;
    /// One sorted window of active products plus the total active count.
    async fn find_active_paginated(
        &self,
        offset: u64,
        limit: u32,
        sort: &Sort,
    ) -> Result<(Vec<Product>, u64), StorefrontError>;
    async fn search_active_by_name(&self, fragment: &str) -> Result<Vec<Product>, StorefrontError>;
    async fn find_active_by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Product>, StorefrontError>;
    /// Inserts or replaces the row keyed by `product.id`.
    async fn save_product(&self, product: Product) -> Result<Product, StorefrontError>;
    async fn ping(&self) -> Result<(), StorefrontError> {
        Ok(())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StorefrontError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, StorefrontError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorefrontError>;
    /// Inserts or replaces a user. Fails with a validation error when another
    /// user already holds the username or email.
    async fn save_user(&self, user: User) -> Result<User, StorefrontError>;
    async fn ping(&self) -> Result<(), StorefrontError> {
        Ok(())
    }
}

pub mod in_memory;

use crate::core::errors::StorefrontError;
use crate::core::models::page::{ProductSortField, Sort, SortDirection};
use crate::core::models::{product::Product, user::User};
use crate::infrastructure::storage::{ProductStore, UserStore};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct UserTable {
    users: HashMap<Uuid, User>,
    ids_by_username: HashMap<String, Uuid>,
    ids_by_email: HashMap<String, Uuid>,
}

/// Process-local store. Product ids are v7 UUIDs, so the `BTreeMap` keeps rows
/// in creation order.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    products: Arc<RwLock<BTreeMap<Uuid, Product>>>,
    users: Arc<RwLock<UserTable>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare_products(a: &Product, b: &Product, sort: &Sort) -> Ordering {
    let ordering = match sort.field {
        ProductSortField::Id => a.id.cmp(&b.id),
        ProductSortField::Name => a.name.cmp(&b.name),
        ProductSortField::Price => a.price.cmp(&b.price),
        ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ProductSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    let ordering = match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ProductStore for InMemoryStorage {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StorefrontError> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_active(&self) -> Result<Vec<Product>, StorefrontError> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| p.is_active).cloned().collect())
    }

    async fn find_active_paginated(
        &self,
        offset: u64,
        limit: u32,
        sort: &Sort,
    ) -> Result<(Vec<Product>, u64), StorefrontError> {
        let products = self.products.read().await;
        let mut active: Vec<&Product> = products.values().filter(|p| p.is_active).collect();
        let total = active.len() as u64;
        active.sort_by(|a, b| compare_products(a, b, sort));

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let window = active
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((window, total))
    }

    async fn search_active_by_name(&self, fragment: &str) -> Result<Vec<Product>, StorefrontError> {
        let needle = fragment.to_lowercase();
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.is_active && p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_active_by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Product>, StorefrontError> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.is_active && p.price >= min && p.price <= max)
            .cloned()
            .collect())
    }

    async fn save_product(&self, product: Product) -> Result<Product, StorefrontError> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }
}

#[async_trait]
impl UserStore for InMemoryStorage {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StorefrontError> {
        let table = self.users.read().await;
        Ok(table.ids_by_username.contains_key(username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StorefrontError> {
        let table = self.users.read().await;
        Ok(table.ids_by_email.contains_key(email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorefrontError> {
        let table = self.users.read().await;
        Ok(table
            .ids_by_username
            .get(username)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn save_user(&self, user: User) -> Result<User, StorefrontError> {
        let mut table = self.users.write().await;
        if table.ids_by_username.get(&user.username).is_some_and(|id| *id != user.id) {
            return Err(StorefrontError::Validation("Username already exists".to_string()));
        }
        if table.ids_by_email.get(&user.email).is_some_and(|id| *id != user.id) {
            return Err(StorefrontError::Validation("Email already exists".to_string()));
        }

        if let Some(previous) = table.users.get(&user.id).cloned() {
            table.ids_by_username.remove(&previous.username);
            table.ids_by_email.remove(&previous.email);
        }
        table.ids_by_username.insert(user.username.clone(), user.id);
        table.ids_by_email.insert(user.email.clone(), user.id);
        table.users.insert(user.id, user.clone());
        Ok(user)
    }
}

use crate::core::errors::StorefrontError;
use crate::core::models::page::{Page, PageRequest};
use crate::core::models::product::{Product, ProductDraft, ProductResponse};
use crate::infrastructure::cache::{Cache, aside, cache_keys};
use crate::infrastructure::metrics;
use crate::infrastructure::storage::ProductStore;
use log::{debug, info};
use rust_decimal::Decimal;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 255;

/// Product catalogue operations.
///
/// Reads of the full listing and of single products go through the cache.
/// Every successful mutation evicts both product namespaces after the store
/// write, so the listing and per-id entries are never invalidated apart.
pub struct ProductService<S: ProductStore, C: Cache> {
    storage: S,
    cache: C,
}

impl<S: ProductStore, C: Cache> ProductService<S, C> {
    pub fn new(storage: S, cache: C) -> Self {
        ProductService { storage, cache }
    }

    pub async fn list_active(&self) -> Result<Vec<ProductResponse>, StorefrontError> {
        aside::read_through(&self.cache, &cache_keys::all_products_key(), || async {
            info!("Fetching all products from storage");
            let products = self.storage.find_active().await?;
            info!("Found {} active products", products.len());
            Ok(products.iter().map(ProductResponse::from).collect::<Vec<_>>())
        })
        .await
    }

    pub async fn list_active_paginated(&self, request: PageRequest) -> Result<Page<ProductResponse>, StorefrontError> {
        request.validate()?;
        info!(
            "Fetching products with pagination: page={}, size={}",
            request.page, request.size
        );
        let (products, total) = self
            .storage
            .find_active_paginated(request.offset(), request.size, &request.sort)
            .await?;
        debug!("Found {} products on page {}", products.len(), request.page);
        Ok(Page::new(products, total, &request).map(|p| ProductResponse::from(&p)))
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductResponse, StorefrontError> {
        aside::read_through(&self.cache, &cache_keys::product_key(id), || async {
            info!("Fetching product with id: {}", id);
            let product = self.find_active_product(id).await?;
            Ok(ProductResponse::from(&product))
        })
        .await
    }

    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<ProductResponse>, StorefrontError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(StorefrontError::Validation("Search term must not be empty".to_string()));
        }
        let products = self.storage.search_active_by_name(fragment).await?;
        debug!("Name search '{}' matched {} products", fragment, products.len());
        Ok(products.iter().map(ProductResponse::from).collect())
    }

    pub async fn list_by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<ProductResponse>, StorefrontError> {
        if min.is_sign_negative() {
            return Err(StorefrontError::Validation("Minimum price must not be negative".to_string()));
        }
        if min > max {
            return Err(StorefrontError::Validation(
                "Minimum price must not exceed maximum price".to_string(),
            ));
        }
        let products = self.storage.find_active_by_price_range(min, max).await?;
        Ok(products.iter().map(ProductResponse::from).collect())
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<ProductResponse, StorefrontError> {
        let draft = validate_draft(draft)?;
        info!("Creating new product: {}", draft.name);

        let saved = self.storage.save_product(Product::new(draft)).await?;
        self.evict_product_caches().await;
        metrics::record_product_created();

        info!("Created product with id: {}", saved.id);
        Ok(ProductResponse::from(&saved))
    }

    pub async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<ProductResponse, StorefrontError> {
        let draft = validate_draft(draft)?;
        info!("Updating product with id: {}", id);

        let mut product = self.find_active_product(id).await?;
        product.apply(draft);
        let updated = self.storage.save_product(product).await?;
        self.evict_product_caches().await;
        metrics::record_product_updated();

        info!("Updated product: {}", updated.name);
        Ok(ProductResponse::from(&updated))
    }

    /// Soft delete. The row stays in storage with `is_active = false`.
    pub async fn delete(&self, id: Uuid) -> Result<(), StorefrontError> {
        info!("Soft deleting product with id: {}", id);

        let mut product = self.find_active_product(id).await?;
        product.deactivate();
        self.storage.save_product(product).await?;
        self.evict_product_caches().await;
        metrics::record_product_deleted();

        info!("Product soft deleted successfully with id: {}", id);
        Ok(())
    }

    pub async fn ping_storage(&self) -> Result<(), StorefrontError> {
        self.storage.ping().await
    }

    pub async fn ping_cache(&self) -> Result<(), StorefrontError> {
        self.cache.ping().await
    }

    async fn find_active_product(&self, id: Uuid) -> Result<Product, StorefrontError> {
        self.storage
            .find_by_id(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| StorefrontError::product_not_found(id))
    }

    async fn evict_product_caches(&self) {
        aside::evict(&self.cache, &cache_keys::PRODUCT_NAMESPACES).await;
    }
}

fn validate_draft(draft: ProductDraft) -> Result<ProductDraft, StorefrontError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(StorefrontError::invalid_input(
            "name",
            "Invalid name",
            "Product name is required",
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(StorefrontError::invalid_input(
            "name",
            "Name Too Long",
            format!("Product name cannot exceed {} characters", MAX_NAME_LENGTH),
        ));
    }
    if draft.price <= Decimal::ZERO {
        return Err(StorefrontError::invalid_input(
            "price",
            "Invalid Price",
            "Price must be positive",
        ));
    }
    Ok(ProductDraft {
        name: name.to_string(),
        ..draft
    })
}

use uuid::Uuid;

/// Namespace holding the full active-product listing.
pub const PRODUCTS_NAMESPACE: &str = "products";
/// Namespace holding single products keyed by id.
pub const PRODUCT_NAMESPACE: &str = "product";

/// Every namespace a product mutation must evict.
pub const PRODUCT_NAMESPACES: [&str; 2] = [PRODUCTS_NAMESPACE, PRODUCT_NAMESPACE];

pub fn namespace_prefix(namespace: &str) -> String {
    format!("{}::", namespace)
}

pub fn all_products_key() -> String {
    format!("{}all", namespace_prefix(PRODUCTS_NAMESPACE))
}

pub fn product_key(id: Uuid) -> String {
    format!("{}{}", namespace_prefix(PRODUCT_NAMESPACE), id)
}

pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use api::{AppState, router};
pub use crate::core::errors::StorefrontError;
pub use crate::core::services::{AuthService, ProductService};
pub use infrastructure::cache::in_memory::InMemoryCache;
pub use infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests; // Service-level tests

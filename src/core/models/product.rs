use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted product row. Never physically removed; `is_active` gates visibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Product {
    pub fn new(draft: ProductDraft) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::now_v7(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Caller-supplied product fields for create and update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    #[schema(example = "iPhone 15")]
    pub name: String,
    #[schema(example = "Latest iPhone model")]
    pub description: Option<String>,
    #[schema(value_type = f64, example = 999.99)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
            is_active: product.is_active,
        }
    }
}

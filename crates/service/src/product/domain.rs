use serde::{Deserialize, Serialize};

/// Persisted product (business view). `id` is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

/// Product about to be inserted; it has no id until the store assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

/// Creation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

impl From<ProductCreate> for NewProduct {
    fn from(c: ProductCreate) -> Self {
        Self { name: c.name, price: c.price, discount: c.discount, store: c.store }
    }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self { id: m.id, name: m.name, price: m.price, discount: m.discount, store: m.store }
    }
}

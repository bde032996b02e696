//! Outbound payload shapes. Product ids are never exposed.

use serde::{Deserialize, Serialize};
use service::product::domain::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductResponse {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_description: String,
}

pub fn to_response(product: &Product) -> ProductResponse {
    ProductResponse {
        name: product.name.clone(),
        price: product.price,
        discount: product.discount,
        store: product.store.clone(),
    }
}

pub fn to_response_list(products: &[Product]) -> Vec<ProductResponse> {
    products.iter().map(to_response).collect()
}

use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use service::product::domain::ProductCreate;
use tracing::info;

use crate::errors::JsonApiError;
use crate::response::{to_response, to_response_list, ProductResponse};
use crate::routes::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Exact store name; empty means no filter.
    pub store: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceQuery {
    pub new_price: f64,
}

#[utoipa::path(
    get, path = "/api/v1/products", tag = "products",
    params(ListQuery),
    responses((status = 200, description = "List OK", body = [ProductResponse]))
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Json<Vec<ProductResponse>> {
    let products = match q.store.as_deref().filter(|s| !s.is_empty()) {
        Some(store) => state.products.get_all_products_by_store(store).await,
        None => state.products.get_all_products().await,
    };
    info!(count = products.len(), store = ?q.store, "list products");
    Json(to_response_list(&products))
}

#[utoipa::path(
    get, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = ProductResponse),
        (status = 404, description = "Not Found", body = crate::response::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ProductResponse>, JsonApiError> {
    let product = state.products.get_by_id(id).await?;
    Ok(Json(to_response(&product)))
}

#[utoipa::path(
    post, path = "/api/v1/products", tag = "products",
    request_body = crate::openapi::ProductCreateDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::response::ErrorResponse),
        (status = 500, description = "Create Failed", body = crate::response::ErrorResponse)
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<ProductCreate>) -> Result<StatusCode, JsonApiError> {
    info!(name = %input.name, store = %input.store, discount = input.discount, "product_create_request");
    state.products.add(input).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product ID"), UpdatePriceQuery),
    responses(
        (status = 200, description = "Updated"),
        (status = 500, description = "Update Failed", body = crate::response::ErrorResponse)
    )
)]
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<UpdatePriceQuery>,
) -> Result<StatusCode, JsonApiError> {
    state.products.update_price(id, q.new_price).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::response::ErrorResponse),
        (status = 500, description = "Delete Failed", body = crate::response::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.products.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}

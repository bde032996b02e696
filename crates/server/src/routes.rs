pub mod products;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::product::{ProductRepository, ProductService};

use crate::openapi::ApiDoc;

pub type SharedProductService = Arc<ProductService<dyn ProductRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub products: SharedProductService,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router over any product repository.
pub fn build_router(product_service: SharedProductService, cors: CorsLayer) -> Router {
    let state = AppState { products: product_service };

    let api = Router::new()
        .route("/api/v1/products", get(products::list).post(products::create))
        .route(
            "/api/v1/products/:id",
            get(products::get).put(products::update_price).delete(products::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

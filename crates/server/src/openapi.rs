use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::response::{ErrorResponse, ProductResponse};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductCreateDoc {
    pub name: String,
    pub price: f64,
    /// Percentage within 0..=70.
    pub discount: f64,
    pub store: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update_price,
        crate::routes::products::delete,
    ),
    components(schemas(HealthResponse, ProductCreateDoc, ProductResponse, ErrorResponse)),
    tags((name = "products", description = "Product catalogue"))
)]
pub struct ApiDoc;

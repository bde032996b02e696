use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

use crate::response::ErrorResponse;

/// Handler error rendered as `{"errorDescription": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub description: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self { status, description: description.into() }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Persistence(_) => {
                error!(code = e.code(), err = %e, "persistence failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error_description: self.description })).into_response()
    }
}

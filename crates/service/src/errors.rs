use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Persistence(_) => 1200,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Persistence(e.to_string()) }
}

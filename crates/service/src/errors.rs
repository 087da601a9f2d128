use thiserror::Error;

use models::booking::BookingStatus;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid transition: {from:?} -> {to:?}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },
    #[error("database error: {0}")]
    Db(String),
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => ServiceError::Validation(m),
            models::errors::ModelError::NotFound(entity) => ServiceError::not_found(entity),
            models::errors::ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}

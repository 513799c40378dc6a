use sea_orm::DbErr;
use thiserror::Error;

use models::errors::ModelError;

/// Failure of a single store operation. Every variant except `Storage` is raised
/// before the operation writes anything.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate name: {0}")]
    DuplicateName(String),
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("in use: {0}")]
    InUse(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn storage(e: DbErr) -> Self { Self::Storage(e.to_string()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Db(msg) => Self::Storage(msg),
        }
    }
}

//! Products service errors.

use thiserror::Error;

use crate::{auth::Forbidden, store::StoreError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Unauthorized(#[from] Forbidden),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            StoreError::InvalidReference
            | StoreError::MissingRequiredData
            | StoreError::InvalidData
            | StoreError::OutOfRange(_) => Self::InvalidData,
            StoreError::Sql(_) => Self::Storage(error),
        }
    }
}

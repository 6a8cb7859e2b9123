//! Users service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("invalid user data")]
    InvalidData,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for UsersServiceError {
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

//! Auth service errors.

use thiserror::Error;

use crate::{auth::ApiTokenError, store::StoreError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("user not found")]
    UnknownUser,

    #[error("storage error")]
    Storage(#[source] StoreError),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::InvalidReference => Self::UnknownUser,
            _ => Self::Storage(error),
        }
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}

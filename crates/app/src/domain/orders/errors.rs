//! Orders service errors.

use thiserror::Error;

use crate::{
    auth::Forbidden,
    domain::products::records::ProductUuid,
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid order: {0}")]
    InvalidRequest(&'static str),

    #[error("order not found")]
    NotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("insufficient stock for {title}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductUuid,
        title: String,
        requested: u32,
        available: u32,
    },

    #[error(transparent)]
    Unauthorized(#[from] Forbidden),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::InvalidReference => Self::InvalidRequest("unknown customer"),
            StoreError::OutOfRange(_) => Self::InvalidRequest("amount out of range"),
            StoreError::AlreadyExists
            | StoreError::MissingRequiredData
            | StoreError::InvalidData
            | StoreError::Sql(_) => Self::Storage(error),
        }
    }
}

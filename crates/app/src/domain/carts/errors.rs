//! Carts service errors.

use thiserror::Error;

use crate::{
    domain::{carts::cart::CartError, products::records::ProductUuid},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("product {0} is not in the cart")]
    EntryNotFound(ProductUuid),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("quantity overflows for product {0}")]
    QuantityOverflow(ProductUuid),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<CartError> for CartsServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::QuantityOverflow(product) => Self::QuantityOverflow(product),
            CartError::EntryNotFound(product) => Self::EntryNotFound(product),
        }
    }
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::UserNotFound,
            _ => Self::Storage(error),
        }
    }
}

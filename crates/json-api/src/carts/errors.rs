//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        CartsServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        CartsServiceError::EntryNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} is not in the cart"))
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::QuantityOverflow(product) => {
            StatusError::bad_request().brief(format!("Quantity too large for product {product}"))
        }
        CartsServiceError::Storage(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

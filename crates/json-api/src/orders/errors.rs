//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::{OrdersServiceError, records::UnknownVariant};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::InvalidRequest(reason) => {
            StatusError::bad_request().brief(format!("Invalid order: {reason}"))
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::InsufficientStock {
            product,
            title,
            requested,
            available,
        } => StatusError::bad_request().brief(format!(
            "Insufficient stock for {title} ({product}): requested {requested}, available {available}"
        )),
        OrdersServiceError::Unauthorized(forbidden) => {
            StatusError::forbidden().brief(forbidden.to_string())
        }
        OrdersServiceError::Storage(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn unknown_label(error: &UnknownVariant) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}

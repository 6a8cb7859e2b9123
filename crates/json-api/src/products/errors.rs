//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Unauthorized(forbidden) => {
            StatusError::forbidden().brief(forbidden.to_string())
        }
        ProductsServiceError::Storage(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use storefront_app::{
        auth::{Capability, Forbidden},
        store::StoreError,
    };

    use super::*;

    #[test]
    fn forbidden_maps_to_403() {
        let error = into_status_error(ProductsServiceError::Unauthorized(Forbidden {
            capability: Capability::ManageCatalog,
        }));

        assert_eq!(error.code, StatusCode::FORBIDDEN);
    }

    #[test]
    fn storage_failures_map_to_500() {
        let error = into_status_error(ProductsServiceError::Storage(StoreError::InvalidData));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

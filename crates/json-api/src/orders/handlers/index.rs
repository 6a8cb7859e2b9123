//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrdersResponse},
    state::State,
};

/// Order Index Handler
///
/// Returns every order, newest first. Admin only.
#[endpoint(
    tags("orders"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::{
        auth::{Capability, Forbidden},
        domain::orders::{MockOrdersService, OrdersServiceError},
    };

    use crate::test_helpers::orders_service;

    use super::*;

    #[tokio::test]
    async fn test_customers_cannot_list_all_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|_| {
            Err(OrdersServiceError::Unauthorized(Forbidden {
                capability: Capability::ViewAllOrders,
            }))
        });

        let service = orders_service(orders, Router::with_path("orders").get(handler));

        let res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_all_orders_returns_200() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let service = orders_service(orders, Router::with_path("orders").get(handler));

        let res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}

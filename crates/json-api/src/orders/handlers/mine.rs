//! My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrdersResponse},
    state::State,
};

/// My Orders Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_my_orders(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::{MockOrdersService, records::OrderUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_PRINCIPAL, make_order, orders_service};

    use super::*;

    #[tokio::test]
    async fn test_list_my_orders_returns_200() -> TestResult {
        let newest = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_my_orders()
            .once()
            .withf(|principal| *principal == TEST_PRINCIPAL)
            .return_once(move |_| Ok(vec![make_order(newest, ProductUuid::new())]));

        let service = orders_service(orders, Router::with_path("orders/mine").get(handler));

        let mut res = TestClient::get("http://example.com/orders/mine")
            .send(&service)
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.orders.first().map(|order| order.uuid),
            Some(newest.into_uuid())
        );

        Ok(())
    }
}

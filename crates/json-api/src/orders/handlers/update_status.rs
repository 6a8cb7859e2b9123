//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::OrderStatusUpdate,
    records::{OrderStatus, PaymentStatus},
};

use crate::{
    extensions::*,
    orders::{
        errors::{into_status_error, unknown_label},
        handlers::OrderResponse,
    },
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Pending, Processing, Shipped, Delivered or Cancelled
    #[serde(default)]
    pub status: Option<String>,

    /// Pending, Paid, Failed or Refunded
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl TryFrom<UpdateOrderStatusRequest> for OrderStatusUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateOrderStatusRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()
            .map_err(|error| unknown_label(&error))?;

        let payment_status = request
            .payment_status
            .as_deref()
            .map(str::parse::<PaymentStatus>)
            .transpose()
            .map_err(|error| unknown_label(&error))?;

        Ok(OrderStatusUpdate {
            status,
            payment_status,
        })
    }
}

/// Update Order Status Handler
///
/// Changes an order's status and/or payment status. Admin only.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown or missing status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();
    let update = OrderStatusUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("order_uuid", tracing::field::display(order));

    let updated = state
        .app
        .orders
        .update_order_status(principal, order.into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        order_uuid = %order,
        status = %updated.status,
        payment_status = %updated.payment_status,
        "updated order status"
    );

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}/status").put(handler))
    }

    #[tokio::test]
    async fn test_update_status_returns_updated_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |_, o, update| {
                *o == uuid
                    && *update
                        == OrderStatusUpdate {
                            status: Some(OrderStatus::Shipped),
                            payment_status: Some(PaymentStatus::Paid),
                        }
            })
            .return_once(move |_, _, update| {
                let mut order = make_order(uuid, ProductUuid::new());

                order.status = update.status.unwrap_or(order.status);
                order.payment_status = update.payment_status.unwrap_or(order.payment_status);

                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "Shipped", "payment_status": "Paid" }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "Shipped");
        assert_eq!(body.payment_status, "Paid");
        assert_eq!(body.total_amount, 33_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put(format!("http://example.com/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "Lost" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::InvalidRequest("nothing to update")));

        let res = TestClient::put(format!("http://example.com/orders/{}/status", Uuid::now_v7()))
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

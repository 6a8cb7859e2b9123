//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    OrdersServiceError,
    data::{NewOrder, OrderLineRequest},
    records::PaymentMethod,
};

use crate::{
    extensions::*,
    observability::{OrderRejection, record_order_placed, record_order_rejected},
    orders::{
        errors::{into_status_error, unknown_label},
        handlers::OrderResponse,
    },
    schemas::{AddressBody, VariationBody},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequestBody {
    pub product: Uuid,
    pub quantity: u32,

    #[serde(default)]
    pub variation: Option<VariationBody>,
}

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub items: Vec<OrderLineRequestBody>,

    pub shipping_address: AddressBody,

    /// Stripe, PayPal or COD
    pub payment_method: String,

    /// In pence/cents
    #[serde(default)]
    pub shipping_cost: u64,

    /// In pence/cents
    #[serde(default)]
    pub tax: u64,
}

impl TryFrom<PlaceOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: PlaceOrderRequest) -> Result<Self, Self::Error> {
        let payment_method = request
            .payment_method
            .parse::<PaymentMethod>()
            .map_err(|error| unknown_label(&error))?;

        Ok(NewOrder {
            items: request
                .items
                .into_iter()
                .map(|line| OrderLineRequest {
                    product: line.product.into(),
                    quantity: line.quantity,
                    variation: line.variation.map(Into::into),
                })
                .collect(),
            shipping_address: request.shipping_address.into(),
            payment_method,
            shipping_cost: request.shipping_cost,
            tax: request.tax,
        })
    }
}

fn record_outcome(result: &Result<impl Sized, OrdersServiceError>) {
    match result {
        Ok(_) => record_order_placed(),
        Err(OrdersServiceError::InsufficientStock { .. }) => {
            record_order_rejected(OrderRejection::InsufficientStock);
        }
        Err(OrdersServiceError::ProductNotFound(_)) => {
            record_order_rejected(OrderRejection::UnknownProduct);
        }
        Err(OrdersServiceError::InvalidRequest(_)) => {
            record_order_rejected(OrderRejection::Invalid);
        }
        Err(_) => {}
    }
}

/// Place Order Handler
///
/// Prices the order against the live catalog and takes its stock. Either
/// every line's stock is taken and the order is created, or nothing changes.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order or insufficient stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.place",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        lines = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = NewOrder::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("lines", order.items.len());

    let result = state.app.orders.place_order(principal, order).await;

    record_outcome(&result);

    let order = result.map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::{MockOrdersService, records::OrderUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_PRINCIPAL, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").post(handler))
    }

    fn order_body(product: ProductUuid, quantity: u32, payment_method: &str) -> Value {
        json!({
            "items": [{ "product": product.into_uuid(), "quantity": quantity }],
            "shipping_address": { "street": "1 High Street", "city": "London" },
            "payment_method": payment_method,
            "shipping_cost": 200,
            "tax": 100
        })
    }

    #[tokio::test]
    async fn test_place_order_returns_201_with_totals() -> TestResult {
        let product = ProductUuid::new();
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(move |principal, order| {
                *principal == TEST_PRINCIPAL
                    && order.items
                        == vec![OrderLineRequest {
                            product,
                            quantity: 3,
                            variation: None,
                        }]
                    && order.payment_method == PaymentMethod::Stripe
                    && order.shipping_cost == 2_00
                    && order.tax == 1_00
            })
            .return_once(move |_, _| Ok(make_order(uuid, product)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&order_body(product, 3, "Stripe"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}").as_str()));
        assert_eq!(body.subtotal, 30_00);
        assert_eq!(body.total_amount, 33_00);
        assert_eq!(body.status, "Pending");
        assert_eq!(
            body.items.first().map(|item| item.price_at_purchase),
            Some(10_00)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_400() -> TestResult {
        let product = ProductUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(move |_, _| {
            Err(OrdersServiceError::InsufficientStock {
                product,
                title: "Mug".to_string(),
                requested: 6,
                available: 5,
            })
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&order_body(product, 6, "COD"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let product = ProductUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .return_once(move |_, _| Err(OrdersServiceError::ProductNotFound(product)));

        let res = TestClient::post("http://example.com/orders")
            .json(&order_body(product, 1, "PayPal"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_payment_method_is_rejected_before_the_service() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&order_body(ProductUuid::new(), 1, "Bitcoin"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

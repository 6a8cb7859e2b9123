//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderLineItem, OrderRecord};

use crate::schemas::{AddressBody, VariationBody};

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod update_status;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product: Uuid,
    pub quantity: u32,
    pub variation: VariationBody,

    /// Unit price in pence/cents when the order was placed
    pub price_at_purchase: u64,
}

impl From<OrderLineItem> for OrderLineResponse {
    fn from(item: OrderLineItem) -> Self {
        OrderLineResponse {
            product: item.product.into(),
            quantity: item.quantity,
            variation: item.variation.into(),
            price_at_purchase: item.price_at_purchase,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user: Uuid,
    pub items: Vec<OrderLineResponse>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total_amount: u64,

    /// Pending, Processing, Shipped, Delivered or Cancelled
    pub status: String,

    /// Pending, Paid, Failed or Refunded
    pub payment_status: String,

    /// Stripe, PayPal or COD
    pub payment_method: String,

    pub shipping_address: AddressBody,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user: order.user.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            tax: order.tax,
            total_amount: order.total_amount,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method.to_string(),
            shipping_address: order.shipping_address.into(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

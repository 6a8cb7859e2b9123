//! Order Data

use crate::domain::{
    orders::{
        pricing::OrderTotals,
        records::{OrderLineItem, OrderStatus, OrderUuid, PaymentMethod, PaymentStatus},
    },
    products::records::{ProductUuid, Variation},
    users::records::{Address, UserUuid},
};

/// One requested line of a checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub product: ProductUuid,
    pub quantity: u32,
    pub variation: Option<Variation>,
}

/// Checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: Vec<OrderLineRequest>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_cost: u64,
    pub tax: u64,
}

/// Priced order ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub items: Vec<OrderLineItem>,
    pub totals: OrderTotals,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
}

/// Order Status Update Data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl OrderStatusUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.payment_status.is_none()
    }
}

/// Which orders to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Restrict to a single customer's orders.
    pub user: Option<UserUuid>,
}

impl OrderFilter {
    #[must_use]
    pub const fn for_user(user: UserUuid) -> Self {
        Self { user: Some(user) }
    }
}

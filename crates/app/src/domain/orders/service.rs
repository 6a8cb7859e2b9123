//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info, warn};

use crate::{
    auth::{Capability, Forbidden, Principal},
    domain::{
        orders::{
            data::{NewOrder, NewOrderRecord, OrderFilter, OrderLineRequest, OrderStatusUpdate},
            errors::OrdersServiceError,
            pricing::OrderTotals,
            records::{OrderLineItem, OrderRecord, OrderUuid},
            repository::OrdersRepository,
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::{ProductsRepository, StockReservation},
        },
    },
};

#[derive(Clone)]
pub struct StoreOrdersService {
    orders: Arc<dyn OrdersRepository>,
    products: Arc<dyn ProductsRepository>,
}

/// Stock taken by an in-flight checkout, returned if the checkout fails.
#[derive(Debug, Default)]
struct Reservations {
    taken: Vec<(ProductUuid, u32)>,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersRepository>, products: Arc<dyn ProductsRepository>) -> Self {
        Self { orders, products }
    }

    /// Check and decrement stock for one line in a single store operation.
    async fn reserve_line(
        &self,
        line: &OrderLineRequest,
    ) -> Result<ProductRecord, OrdersServiceError> {
        match self
            .products
            .reserve_stock(line.product, line.quantity)
            .await?
        {
            StockReservation::Reserved(product) => Ok(product),
            StockReservation::Insufficient(product) => Err(OrdersServiceError::InsufficientStock {
                product: product.uuid,
                title: product.title,
                requested: line.quantity,
                available: product.stock_quantity,
            }),
            StockReservation::Missing => Err(OrdersServiceError::ProductNotFound(line.product)),
        }
    }

    /// Give back everything reserved so far. Failures are logged; the caller
    /// still reports the error that aborted the checkout.
    async fn release(&self, reservations: Reservations) {
        for (product, quantity) in reservations.taken.into_iter().rev() {
            if let Err(release_error) = self.products.release_stock(product, quantity).await {
                error!(
                    product_uuid = %product,
                    quantity,
                    error = %release_error,
                    "failed to release reserved stock"
                );
            }
        }
    }

    async fn reserve_all(
        &self,
        lines: &[OrderLineRequest],
        reservations: &mut Reservations,
    ) -> Result<(Vec<OrderLineItem>, Vec<ProductRecord>), OrdersServiceError> {
        let mut items = Vec::with_capacity(lines.len());
        let mut low_stock = Vec::new();

        for line in lines {
            let product = self.reserve_line(line).await?;

            reservations.taken.push((line.product, line.quantity));

            items.push(OrderLineItem {
                product: line.product,
                quantity: line.quantity,
                variation: line.variation.clone().unwrap_or_default(),
                price_at_purchase: product.price,
            });

            // Repeated lines for one product keep only the latest snapshot.
            low_stock.retain(|seen: &ProductRecord| seen.uuid != product.uuid);

            if product.is_low_stock() {
                low_stock.push(product);
            }
        }

        Ok((items, low_stock))
    }
}

fn validate(order: &NewOrder) -> Result<(), OrdersServiceError> {
    if order.items.is_empty() {
        return Err(OrdersServiceError::InvalidRequest("no order items"));
    }

    if order.items.iter().any(|line| line.quantity == 0) {
        return Err(OrdersServiceError::InvalidRequest(
            "line quantity must be at least 1",
        ));
    }

    Ok(())
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, principal, order),
        fields(user_uuid = %principal.user, lines = order.items.len()),
        err
    )]
    async fn place_order(
        &self,
        principal: Principal,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        validate(&order)?;

        let mut reservations = Reservations::default();

        let (items, low_stock) = match self.reserve_all(&order.items, &mut reservations).await {
            Ok(reserved) => reserved,
            Err(reserve_error) => {
                self.release(reservations).await;
                return Err(reserve_error);
            }
        };

        let totals = match OrderTotals::compute(&items, order.shipping_cost, order.tax) {
            Ok(totals) => totals,
            Err(_overflow) => {
                self.release(reservations).await;
                return Err(OrdersServiceError::InvalidRequest("order amount overflows"));
            }
        };

        let record = NewOrderRecord {
            uuid: OrderUuid::new(),
            user: principal.user,
            items,
            totals,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
        };

        let created = match self.orders.create_order(record).await {
            Ok(created) => created,
            Err(store_error) => {
                self.release(reservations).await;
                return Err(store_error.into());
            }
        };

        info!(
            order_uuid = %created.uuid,
            total_amount = created.total_amount,
            "placed order"
        );

        for product in low_stock {
            warn!(
                product_uuid = %product.uuid,
                sku = %product.sku,
                stock_quantity = product.stock_quantity,
                threshold = product.low_stock_alert_threshold,
                "product stock is low"
            );
        }

        Ok(created)
    }

    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = self
            .orders
            .find_order(order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !principal.can_view_owned_by(order.user) {
            return Err(Forbidden {
                capability: Capability::ViewAllOrders,
            }
            .into());
        }

        Ok(order)
    }

    async fn list_my_orders(
        &self,
        principal: Principal,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        Ok(self
            .orders
            .list_orders(OrderFilter::for_user(principal.user))
            .await?)
    }

    async fn list_orders(
        &self,
        principal: Principal,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        principal.require(Capability::ViewAllOrders)?;

        Ok(self.orders.list_orders(OrderFilter::default()).await?)
    }

    #[tracing::instrument(
        name = "orders.service.update_order_status",
        skip(self, principal),
        fields(user_uuid = %principal.user, order_uuid = %order),
        err
    )]
    async fn update_order_status(
        &self,
        principal: Principal,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        principal.require(Capability::ManageOrders)?;

        if update.is_empty() {
            return Err(OrdersServiceError::InvalidRequest(
                "status or payment status is required",
            ));
        }

        self.orders
            .update_order_status(order, update)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price a checkout against the live catalog, take its stock and persist
    /// the order. Either every line's stock is taken and the order exists, or
    /// no stock changes.
    async fn place_order(
        &self,
        principal: Principal,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Fetch an order owned by the principal, or any order for an admin.
    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn list_my_orders(
        &self,
        principal: Principal,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order in the store. Admin only.
    async fn list_orders(
        &self,
        principal: Principal,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn update_order_status(
        &self,
        principal: Principal,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

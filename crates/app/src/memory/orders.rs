use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::orders::{
        data::{NewOrderRecord, OrderFilter, OrderStatusUpdate},
        records::{OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
        repository::OrdersRepository,
    },
    memory::MemoryStore,
    store::StoreError,
};

#[async_trait]
impl OrdersRepository for MemoryStore {
    async fn create_order(&self, order: NewOrderRecord) -> Result<OrderRecord, StoreError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&order.user) {
            return Err(StoreError::InvalidReference);
        }

        if state.orders.contains_key(&order.uuid) {
            return Err(StoreError::AlreadyExists);
        }

        let now = Timestamp::now();

        let record = OrderRecord {
            uuid: order.uuid,
            user: order.user,
            items: order.items,
            subtotal: order.totals.subtotal,
            shipping_cost: order.totals.shipping_cost,
            tax: order.totals.tax,
            total_amount: order.totals.total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
            created_at: now,
            updated_at: now,
        };

        state.orders.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn find_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, StoreError> {
        Ok(self.state.read().await.orders.get(&order).cloned())
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, StoreError> {
        let state = self.state.read().await;

        Ok(state
            .orders
            .values()
            .rev()
            .filter(|order| filter.user.is_none_or(|user| order.user == user))
            .cloned()
            .collect())
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let mut state = self.state.write().await;

        let Some(record) = state.orders.get_mut(&order) else {
            return Ok(None);
        };

        if let Some(status) = update.status {
            record.status = status;
        }

        if let Some(payment_status) = update.payment_status {
            record.payment_status = payment_status;
        }

        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }
}

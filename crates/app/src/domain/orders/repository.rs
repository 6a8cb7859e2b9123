//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, types::Json};

use crate::{
    database::{amount_param, try_get_amount},
    domain::{
        orders::{
            data::{NewOrderRecord, OrderFilter, OrderStatusUpdate},
            records::{OrderRecord, OrderUuid},
        },
        users::records::UserUuid,
    },
    store::StoreError,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn try_get_label<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let label: String = row.try_get(col)?;

    label.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: row.try_get::<Json<_>, _>("items")?.0,
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            tax: try_get_amount(row, "tax")?,
            total_amount: try_get_amount(row, "total_amount")?,
            status: try_get_label(row, "status")?,
            payment_status: try_get_label(row, "payment_status")?,
            payment_method: try_get_label(row, "payment_method")?,
            shipping_address: row.try_get::<Json<_>, _>("shipping_address")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: NewOrderRecord) -> Result<OrderRecord, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(Json(order.items))
            .bind(amount_param(order.totals.subtotal, "subtotal")?)
            .bind(amount_param(order.totals.shipping_cost, "shipping_cost")?)
            .bind(amount_param(order.totals.tax, "tax")?)
            .bind(amount_param(order.totals.total_amount, "total_amount")?)
            .bind(order.payment_method.as_str())
            .bind(Json(order.shipping_address))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.user.map(UserUuid::into_uuid))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Option<OrderRecord>, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(update.status.map(|status| status.as_str()))
            .bind(update.payment_status.map(|status| status.as_str()))
            .fetch_optional(&self.pool)
            .await?)
    }
}

/// Order store. Orders are immutable apart from their status fields.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn create_order(&self, order: NewOrderRecord) -> Result<OrderRecord, StoreError>;

    async fn find_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, StoreError>;

    /// Newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, StoreError>;

    /// Returns `None` when no order has the given id.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Option<OrderRecord>, StoreError>;
}

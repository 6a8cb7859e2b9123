//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, types::Json};

use crate::{
    database::{amount_param, count_param, try_get_amount, try_get_count},
    domain::products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
    store::StoreError,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const RESERVE_STOCK_SQL: &str = include_str!("sql/reserve_stock.sql");
const RELEASE_STOCK_SQL: &str = include_str!("sql/release_stock.sql");

/// Outcome of an atomic conditional stock decrement.
#[derive(Debug, Clone, PartialEq)]
pub enum StockReservation {
    /// Stock was decremented; carries the product after the decrement.
    Reserved(ProductRecord),

    /// Not enough stock; carries the product as it currently stands.
    Insufficient(ProductRecord),

    /// No live product with that id.
    Missing,
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            images: row.try_get::<Json<Vec<String>>, _>("images")?.0,
            videos: row.try_get::<Json<Vec<String>>, _>("videos")?.0,
            price: try_get_amount(row, "price")?,
            variations: row.try_get::<Json<_>, _>("variations")?.0,
            sku: row.try_get("sku")?,
            stock_quantity: try_get_count(row, "stock_quantity")?,
            low_stock_alert_threshold: try_get_count(row, "low_stock_alert_threshold")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, StoreError> {
        Ok(query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, StoreError> {
        Ok(query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.title)
            .bind(product.description)
            .bind(Json(product.images))
            .bind(Json(product.videos))
            .bind(amount_param(product.price, "price")?)
            .bind(Json(product.variations))
            .bind(product.sku)
            .bind(count_param(product.stock_quantity, "stock_quantity")?)
            .bind(count_param(
                product.low_stock_alert_threshold,
                "low_stock_alert_threshold",
            )?)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StoreError> {
        let price = update
            .price
            .map(|price| amount_param(price, "price"))
            .transpose()?;

        let stock_quantity = update
            .stock_quantity
            .map(|stock| count_param(stock, "stock_quantity"))
            .transpose()?;

        let threshold = update
            .low_stock_alert_threshold
            .map(|threshold| count_param(threshold, "low_stock_alert_threshold"))
            .transpose()?;

        Ok(query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.title)
            .bind(update.description)
            .bind(update.images.map(Json))
            .bind(update.videos.map(Json))
            .bind(price)
            .bind(update.variations.map(Json))
            .bind(update.sku)
            .bind(stock_quantity)
            .bind(threshold)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn reserve_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockReservation, StoreError> {
        let reserved = query_as::<Postgres, ProductRecord>(RESERVE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_param(quantity, "stock_quantity")?)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(reserved) = reserved {
            return Ok(StockReservation::Reserved(reserved));
        }

        // The decrement already failed atomically; this read only explains why.
        Ok(match self.find_product(product).await? {
            Some(current) => StockReservation::Insufficient(current),
            None => StockReservation::Missing,
        })
    }

    async fn release_stock(&self, product: ProductUuid, quantity: u32) -> Result<(), StoreError> {
        let rows_affected = query(RELEASE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_param(quantity, "stock_quantity")?)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// Catalog store.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// All live (not deleted) products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError>;

    async fn find_product(&self, product: ProductUuid)
    -> Result<Option<ProductRecord>, StoreError>;

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, StoreError>;

    /// Returns `None` when no live product has the given id.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StoreError>;

    /// Soft-deletes a product. Returns `false` when it was not live.
    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError>;

    /// Decrement stock by `quantity` iff at least `quantity` is available, as a
    /// single atomic operation.
    async fn reserve_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockReservation, StoreError>;

    /// Return stock taken by [`ProductsRepository::reserve_stock`]. Deleted
    /// products still take their stock back; an unknown id is
    /// [`StoreError::NotFound`].
    async fn release_stock(&self, product: ProductUuid, quantity: u32) -> Result<(), StoreError>;
}

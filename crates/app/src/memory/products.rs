use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
        repository::{ProductsRepository, StockReservation},
    },
    memory::{MemoryStore, State},
    store::StoreError,
};

impl State {
    fn live_product_mut(&mut self, product: ProductUuid) -> Option<&mut ProductRecord> {
        self.products
            .get_mut(&product)
            .filter(|record| record.deleted_at.is_none())
    }

    fn sku_taken(&self, sku: &str, except: Option<ProductUuid>) -> bool {
        self.products.values().any(|record| {
            record.deleted_at.is_none() && record.sku == sku && Some(record.uuid) != except
        })
    }
}

#[async_trait]
impl ProductsRepository for MemoryStore {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let state = self.state.read().await;

        Ok(state
            .products
            .values()
            .filter(|record| record.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, StoreError> {
        let state = self.state.read().await;

        Ok(state
            .products
            .get(&product)
            .filter(|record| record.deleted_at.is_none())
            .cloned())
    }

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, StoreError> {
        let mut state = self.state.write().await;

        if state.products.contains_key(&product.uuid) || state.sku_taken(&product.sku, None) {
            return Err(StoreError::AlreadyExists);
        }

        let now = Timestamp::now();

        let record = ProductRecord {
            uuid: product.uuid,
            title: product.title,
            description: product.description,
            images: product.images,
            videos: product.videos,
            price: product.price,
            variations: product.variations,
            sku: product.sku,
            stock_quantity: product.stock_quantity,
            low_stock_alert_threshold: product.low_stock_alert_threshold,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        state.products.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StoreError> {
        let mut state = self.state.write().await;

        if update
            .sku
            .as_deref()
            .is_some_and(|sku| state.sku_taken(sku, Some(product)))
        {
            return Err(StoreError::AlreadyExists);
        }

        let Some(record) = state.live_product_mut(product) else {
            return Ok(None);
        };

        update.apply_to(record);
        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;

        let Some(record) = state.live_product_mut(product) else {
            return Ok(false);
        };

        let now = Timestamp::now();

        record.deleted_at = Some(now);
        record.updated_at = now;

        Ok(true)
    }

    async fn reserve_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockReservation, StoreError> {
        let mut state = self.state.write().await;

        let Some(record) = state.live_product_mut(product) else {
            return Ok(StockReservation::Missing);
        };

        let Some(remaining) = record.stock_quantity.checked_sub(quantity) else {
            return Ok(StockReservation::Insufficient(record.clone()));
        };

        record.stock_quantity = remaining;
        record.updated_at = Timestamp::now();

        Ok(StockReservation::Reserved(record.clone()))
    }

    async fn release_stock(&self, product: ProductUuid, quantity: u32) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        // Released stock goes back even if the product was deleted meanwhile.
        let Some(record) = state.products.get_mut(&product) else {
            return Err(StoreError::NotFound);
        };

        record.stock_quantity = record
            .stock_quantity
            .checked_add(quantity)
            .ok_or(StoreError::OutOfRange("stock_quantity"))?;
        record.updated_at = Timestamp::now();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn reserve_stock_is_conditional() -> TestResult {
        let store = MemoryStore::new();
        let product = store
            .create_product(NewProduct::new(ProductUuid::new(), "Mug", "", 8_00, 2))
            .await?;

        assert!(matches!(
            store.reserve_stock(product.uuid, 3).await?,
            StockReservation::Insufficient(current) if current.stock_quantity == 2
        ));
        assert!(matches!(
            store.reserve_stock(product.uuid, 2).await?,
            StockReservation::Reserved(after) if after.stock_quantity == 0
        ));
        assert!(matches!(
            store.reserve_stock(ProductUuid::new(), 1).await?,
            StockReservation::Missing
        ));

        store.release_stock(product.uuid, 2).await?;

        let restored = store.find_product(product.uuid).await?.ok_or("product missing")?;

        assert_eq!(restored.stock_quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn release_stock_of_unknown_product_is_not_found() -> TestResult {
        let store = MemoryStore::new();

        assert!(matches!(
            store.release_stock(ProductUuid::new(), 1).await,
            Err(StoreError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn deleted_products_take_released_stock_back() -> TestResult {
        let store = MemoryStore::new();
        let product = store
            .create_product(NewProduct::new(ProductUuid::new(), "Mug", "", 8_00, 2))
            .await?;

        store.delete_product(product.uuid).await?;
        store.release_stock(product.uuid, 3).await?;

        let state = store.state.read().await;
        let record = state.products.get(&product.uuid).ok_or("product missing")?;

        assert_eq!(record.stock_quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_products_cannot_be_reserved() -> TestResult {
        let store = MemoryStore::new();
        let product = store
            .create_product(NewProduct::new(ProductUuid::new(), "Mug", "", 8_00, 2))
            .await?;

        assert!(store.delete_product(product.uuid).await?);
        assert!(!store.delete_product(product.uuid).await?);

        assert!(matches!(
            store.reserve_stock(product.uuid, 1).await?,
            StockReservation::Missing
        ));

        Ok(())
    }

    #[tokio::test]
    async fn sku_is_free_again_after_delete() -> TestResult {
        let store = MemoryStore::new();

        let mut first = NewProduct::new(ProductUuid::new(), "Mug", "", 8_00, 2);
        first.sku = "MUG".to_string();
        let first = store.create_product(first).await?;

        store.delete_product(first.uuid).await?;

        let mut second = NewProduct::new(ProductUuid::new(), "Mug", "", 8_00, 2);
        second.sku = "MUG".to_string();

        assert_eq!(store.create_product(second).await?.sku, "MUG");

        Ok(())
    }
}

//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{Capability, Principal},
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::ProductsRepository,
    },
};

#[derive(Clone)]
pub struct StoreProductsService {
    repository: Arc<dyn ProductsRepository>,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        Ok(self.repository.list_products().await?)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.repository
            .find_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, sku = %product.sku),
        err
    )]
    async fn create_product(
        &self,
        principal: Principal,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        principal.require(Capability::ManageCatalog)?;

        let created = self.repository.create_product(product).await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        principal: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        principal.require(Capability::ManageCatalog)?;

        self.repository
            .update_product(product, update)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn delete_product(
        &self,
        principal: Principal,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        principal.require(Capability::ManageCatalog)?;

        if !self.repository.delete_product(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List every live product.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with the given details.
    async fn create_product(
        &self,
        principal: Principal,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Updates the supplied fields of a product.
    async fn update_product(
        &self,
        principal: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product so existing orders keep a resolvable reference.
    async fn delete_product(
        &self,
        principal: Principal,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}

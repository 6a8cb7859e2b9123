//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Principal,
    domain::{
        carts::{
            cart::Cart,
            data::{CartItemAdd, CartItemUpdate},
            errors::CartsServiceError,
            records::{CartProduct, ResolvedCartEntry},
        },
        products::{records::ProductUuid, repository::ProductsRepository},
        users::repository::UsersRepository,
    },
};

#[derive(Clone)]
pub struct StoreCartsService {
    users: Arc<dyn UsersRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(users: Arc<dyn UsersRepository>, products: Arc<dyn ProductsRepository>) -> Self {
        Self { users, products }
    }

    async fn load_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError> {
        self.users
            .find_user(principal.user)
            .await?
            .map(|user| user.cart)
            .ok_or(CartsServiceError::UserNotFound)
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn get_cart(
        &self,
        principal: Principal,
    ) -> Result<Vec<ResolvedCartEntry>, CartsServiceError> {
        let cart = self.load_cart(principal).await?;

        let mut resolved = Vec::with_capacity(cart.len());

        for entry in cart.entries() {
            let product = self.products.find_product(entry.product).await?;

            resolved.push(ResolvedCartEntry {
                product_uuid: entry.product,
                quantity: entry.quantity,
                variation: entry.variation.clone(),
                product: product.map(CartProduct::from),
            });
        }

        Ok(resolved)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, principal, item),
        fields(user_uuid = %principal.user, product_uuid = %item.product),
        err
    )]
    async fn add_item(
        &self,
        principal: Principal,
        item: CartItemAdd,
    ) -> Result<Cart, CartsServiceError> {
        let quantity = item.quantity();

        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        if self.products.find_product(item.product).await?.is_none() {
            return Err(CartsServiceError::ProductNotFound(item.product));
        }

        let mut cart = self.load_cart(principal).await?;

        cart.add(item.product, quantity, item.variation)?;

        self.users.save_cart(principal.user, &cart).await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self, principal, update),
        fields(user_uuid = %principal.user, product_uuid = %product),
        err
    )]
    async fn update_item(
        &self,
        principal: Principal,
        product: ProductUuid,
        update: CartItemUpdate,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load_cart(principal).await?;

        cart.update(product, update.quantity, update.variation)?;

        self.users.save_cart(principal.user, &cart).await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self, principal),
        fields(user_uuid = %principal.user, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        principal: Principal,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load_cart(principal).await?;

        if cart.remove(product) {
            self.users.save_cart(principal.user, &cart).await?;
        }

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self, principal),
        fields(user_uuid = %principal.user),
        err
    )]
    async fn clear_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError> {
        let cart = Cart::default();

        self.users.save_cart(principal.user, &cart).await?;

        Ok(cart)
    }
}

/// Operations on the authenticated principal's own cart.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The cart with every entry resolved against the live catalog.
    async fn get_cart(
        &self,
        principal: Principal,
    ) -> Result<Vec<ResolvedCartEntry>, CartsServiceError>;

    /// Add a product, merging with an existing entry for the same product.
    async fn add_item(
        &self,
        principal: Principal,
        item: CartItemAdd,
    ) -> Result<Cart, CartsServiceError>;

    async fn update_item(
        &self,
        principal: Principal,
        product: ProductUuid,
        update: CartItemUpdate,
    ) -> Result<Cart, CartsServiceError>;

    /// Idempotent: removing an absent product succeeds.
    async fn remove_item(
        &self,
        principal: Principal,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    async fn clear_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError>;
}

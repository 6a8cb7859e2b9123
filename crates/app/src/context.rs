//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthRepository, AuthService, PgAuthRepository, StoreAuthService},
    database,
    domain::{
        carts::{CartsService, StoreCartsService},
        orders::{
            OrdersService, StoreOrdersService,
            repository::{OrdersRepository, PgOrdersRepository},
        },
        products::{
            ProductsService, StoreProductsService,
            repository::{PgProductsRepository, ProductsRepository},
        },
        users::{
            StoreUsersService, UsersService,
            repository::{PgUsersRepository, UsersRepository},
        },
    },
    memory::MemoryStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// One implementation of every repository, sharing a backend.
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn ProductsRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub orders: Arc<dyn OrdersRepository>,
    pub auth: Arc<dyn AuthRepository>,
}

impl Stores {
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            products: Arc::new(PgProductsRepository::new(pool.clone())),
            users: Arc::new(PgUsersRepository::new(pool.clone())),
            orders: Arc::new(PgOrdersRepository::new(pool.clone())),
            auth: Arc::new(PgAuthRepository::new(pool)),
        }
    }

    #[must_use]
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            products: store.clone(),
            users: store.clone(),
            orders: store.clone(),
            auth: store,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::memory(Arc::new(MemoryStore::new()))
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_stores(&Stores::postgres(pool)))
    }

    /// Application context over a fresh, empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_stores(&Stores::in_memory())
    }

    #[must_use]
    pub fn from_stores(stores: &Stores) -> Self {
        Self {
            products: Arc::new(StoreProductsService::new(Arc::clone(&stores.products))),
            carts: Arc::new(StoreCartsService::new(
                Arc::clone(&stores.users),
                Arc::clone(&stores.products),
            )),
            orders: Arc::new(StoreOrdersService::new(
                Arc::clone(&stores.orders),
                Arc::clone(&stores.products),
            )),
            users: Arc::new(StoreUsersService::new(Arc::clone(&stores.users))),
            auth: Arc::new(StoreAuthService::new(
                Arc::clone(&stores.auth),
                Arc::clone(&stores.users),
            )),
        }
    }
}
